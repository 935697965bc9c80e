use tracing::trace;
use wim_protocol::Lexicon;
use wim_tree::{NodeId, PhraseTree};

use crate::error::Mismatch;
use crate::knowledge::FrameTemplate;

/// A template accepted for one verb phrase, with the constituents its
/// roles bind to.
#[derive(Debug, Clone)]
pub struct FrameMatch<'kb> {
    pub template: &'kb FrameTemplate,
    pub constituents: Vec<NodeId>,
}

impl FrameTemplate {
    /// Acceptance test: the constituent map must pick out exactly as many
    /// constituents as the frame key has words, and every tagged constituent
    /// must pass each of its predicates.
    pub fn matches<'kb>(
        &'kb self,
        tree: &PhraseTree,
        vp: NodeId,
        lexicon: &dyn Lexicon,
    ) -> Result<FrameMatch<'kb>, Mismatch> {
        if tree.find_parent(vp, "CL").is_none() {
            return Err(Mismatch::NoClause);
        }

        let found = tree.constituents(vp, &self.constituent_map);
        if found.len() != self.arity() {
            return Err(Mismatch::Arity {
                expected: self.arity(),
                found: found.len(),
            });
        }

        for (index, constituent) in found.iter().enumerate() {
            let tag = match &constituent.tag {
                Some(tag) => tag,
                None => continue,
            };

            for predicate in tag.predicates().iter().filter(|p| !p.is_head()) {
                match tree.satisfies(constituent.node, predicate, vp, lexicon) {
                    Some(true) => {}
                    Some(false) => {
                        return Err(Mismatch::PredicateFalse {
                            index,
                            predicate: predicate.name().to_string(),
                        })
                    }
                    None => {
                        return Err(Mismatch::PredicateUnsupported {
                            index,
                            label: tree
                                .label(constituent.node)
                                .map(|label| label.to_string())
                                .unwrap_or_default(),
                            predicate: predicate.name().to_string(),
                        })
                    }
                }
            }
        }

        trace!(frame = %self.frame_key, constituents = found.len(), "Template matched");
        Ok(FrameMatch {
            template: self,
            constituents: found.into_iter().map(|c| c.node).collect(),
        })
    }
}
