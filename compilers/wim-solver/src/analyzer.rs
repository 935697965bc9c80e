use serde::Serialize;
use tracing::{debug, trace, warn};
use wim_protocol::{BracketTree, FrameId, Lexicon, SKIP_ROLE};
use wim_tree::{NodeId, PhraseTree};

use crate::disambiguate::select;
use crate::error::AnalysisError;
use crate::graph::WimGraph;
use crate::knowledge::KnowledgeBase;
use crate::template::FrameMatch;

/// What to do when the chosen template has fewer roles than constituents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverrunPolicy {
    /// Keep the roles bound so far, record a diagnostic and move on to the
    /// next verb phrase.
    #[default]
    Truncate,
    /// Fail the analysis with `AnalysisError::RoleMismatch`.
    Strict,
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    pub overrun: OverrunPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    RoleOverrun {
        verb_phrase: String,
        frame_key: String,
        roles: usize,
        constituents: usize,
    },
}

/// The sense picked for one verb phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenseAssignment {
    pub frame: String,
    pub frame_key: String,
    pub sense: String,
}

#[derive(Debug, Default)]
pub struct Analysis {
    pub wim: WimGraph,
    pub senses: Vec<SenseAssignment>,
    pub diagnostics: Vec<Diagnostic>,
}

struct Candidate<'kb> {
    sense: String,
    found: FrameMatch<'kb>,
}

/// Builds a WIM for a phrase tree against a shared knowledge base.
pub struct Analyzer<'a> {
    knowledge: &'a KnowledgeBase,
    lexicon: &'a dyn Lexicon,
    options: AnalyzerOptions,
}

impl<'a> Analyzer<'a> {
    pub fn new(knowledge: &'a KnowledgeBase, lexicon: &'a dyn Lexicon) -> Self {
        Self {
            knowledge,
            lexicon,
            options: AnalyzerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn analyze_str(&self, parse: &str) -> Result<Analysis, AnalysisError> {
        self.analyze_bracket(&wim_parser::parse_tree(parse)?)
    }

    pub fn analyze_bracket(&self, parse: &BracketTree) -> Result<Analysis, AnalysisError> {
        let mut tree = PhraseTree::from_bracket(parse)?;
        self.analyze(&mut tree)
    }

    /// Every verb phrase, in pre-order, gets a frame; the ones with a
    /// matching template get their roles bound to the matched constituents.
    pub fn analyze(&self, tree: &mut PhraseTree) -> Result<Analysis, AnalysisError> {
        tree.clear_frames();
        let mut analysis = Analysis::default();

        let root = match tree.root() {
            Some(root) => root,
            None => return Ok(analysis),
        };

        for vp in tree.find_all(root, "VP") {
            let vp_frame = ensure_frame(tree, &mut analysis.wim, vp)?;

            let head = match tree.head_text(vp)? {
                Some(head) => head,
                None => {
                    debug!(phrase = %tree.text(vp), "Verb phrase without a head verb");
                    continue;
                }
            };

            let mut candidates = self.candidates(tree, vp, &head);
            let chosen = match select(candidates.iter().map(|c| c.found.template)) {
                Some(index) => candidates.swap_remove(index),
                None => {
                    debug!(verb = %head, "No template matched");
                    continue;
                }
            };

            let verb_phrase = analysis.wim.name(vp_frame).unwrap_or_default();
            analysis.senses.push(SenseAssignment {
                frame: verb_phrase.clone(),
                frame_key: chosen.found.template.frame_key.clone(),
                sense: chosen.sense,
            });

            self.bind(tree, &mut analysis, vp_frame, verb_phrase, &chosen.found)?;
        }

        Ok(analysis)
    }

    /// Every template, over all senses of the head verb, that matches `vp`.
    fn candidates(&self, tree: &PhraseTree, vp: NodeId, head: &str) -> Vec<Candidate<'a>> {
        let mut candidates = Vec::new();

        for sense in self.lexicon.verb_senses(head) {
            for surface in &sense.frames {
                let templates = match self.knowledge.lookup(surface, &sense.lemma) {
                    Ok(templates) => templates,
                    Err(err) => {
                        debug!(%err, sense = %sense.sense, "Skipping frame");
                        continue;
                    }
                };

                for template in templates {
                    match template.matches(tree, vp, self.lexicon) {
                        Ok(found) => candidates.push(Candidate {
                            sense: sense.sense.clone(),
                            found,
                        }),
                        Err(mismatch) => {
                            trace!(frame = %template.frame_key, %mismatch, "Template rejected")
                        }
                    }
                }
            }
        }
        candidates
    }

    fn bind(
        &self,
        tree: &mut PhraseTree,
        analysis: &mut Analysis,
        vp_frame: FrameId,
        verb_phrase: String,
        found: &FrameMatch<'_>,
    ) -> Result<(), AnalysisError> {
        let roles = &found.template.role_template;

        if roles.len() < found.constituents.len() {
            if self.options.overrun == OverrunPolicy::Strict {
                return Err(AnalysisError::RoleMismatch {
                    verb_phrase,
                    frame_key: found.template.frame_key.clone(),
                    roles: roles.len(),
                    constituents: found.constituents.len(),
                });
            }

            warn!(
                frame = %verb_phrase,
                template = %found.template.frame_key,
                roles = roles.len(),
                constituents = found.constituents.len(),
                "Role template shorter than constituents, binding truncated"
            );
            analysis.diagnostics.push(Diagnostic::RoleOverrun {
                verb_phrase,
                frame_key: found.template.frame_key.clone(),
                roles: roles.len(),
                constituents: found.constituents.len(),
            });
        }

        for (role, node) in roles.iter().zip(&found.constituents) {
            if role == SKIP_ROLE {
                continue;
            }
            let child = ensure_frame(tree, &mut analysis.wim, *node)?;
            analysis.wim.add_reference(vp_frame, role.as_str(), child)?;
        }
        Ok(())
    }
}

/// One frame per phrase node, created on first use with its `fromtext`.
fn ensure_frame(tree: &mut PhraseTree, wim: &mut WimGraph, node: NodeId) -> Result<FrameId, AnalysisError> {
    if let Some(frame) = tree.frame(node) {
        return Ok(frame);
    }

    let frame = wim.add_frame(tree.frame_type(node));
    wim.add_literal(frame, "fromtext", tree.text(node))?;
    tree.cache_frame(node, frame)?;
    Ok(frame)
}
