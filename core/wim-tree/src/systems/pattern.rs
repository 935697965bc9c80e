use wim_protocol::{FunctionalTag, Pattern};

use crate::{NodeId, PhraseTree};

/// A phrase picked out by a constituent-map pattern, with the functional
/// tag of the pattern node it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constituent {
    pub node: NodeId,
    pub tag: Option<FunctionalTag>,
}

impl PhraseTree {
    /// Walks the children of `node` against `patterns`, flattening whatever
    /// the pattern leaves select regardless of nesting depth.
    ///
    /// Children are consumed left to right: once a pattern node has scanned
    /// past a child, later pattern nodes never see it.
    pub fn pattern_search(&self, node: NodeId, patterns: &[Pattern]) -> Vec<Constituent> {
        let mut found = Vec::new();
        self.collect_pattern(node, patterns, &mut found);
        found
    }

    fn collect_pattern(&self, node: NodeId, patterns: &[Pattern], found: &mut Vec<Constituent>) {
        let children = self.child_nodes(node);
        let mut cursor = 0;

        for pattern in patterns {
            while cursor < children.len() {
                let child = children[cursor];
                cursor += 1;
                if !self.has_label(child, &pattern.label) {
                    continue;
                }

                if pattern.is_leaf() || pattern.tag.is_some() {
                    found.push(Constituent { node: child, tag: pattern.tag.clone() });
                }
                if !pattern.is_leaf() {
                    self.collect_pattern(child, &pattern.children, found);
                }
                break;
            }
        }
    }

    /// Constituents of the clause enclosing `vp`, deduplicated by identity
    /// in first-seen order. Empty when the verb phrase has no clause.
    pub fn constituents(&self, vp: NodeId, verbmap: &Pattern) -> Vec<Constituent> {
        let clause = match self.find_parent(vp, "CL") {
            Some(clause) => clause,
            None => return Vec::new(),
        };

        let mut unique: Vec<Constituent> = Vec::new();
        for constituent in self.pattern_search(clause, &verbmap.children) {
            match unique.iter_mut().find(|seen| seen.node == constituent.node) {
                // the latest tag wins, like a re-bound attribute
                Some(seen) => {
                    if constituent.tag.is_some() {
                        seen.tag = constituent.tag;
                    }
                }
                None => unique.push(constituent),
            }
        }
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::tree;
    use wim_protocol::Predicate;

    fn verbmap(input: &str) -> Pattern {
        let bracket = wim_parser::parse_tree(input).unwrap();
        Pattern::from_bracket(&bracket).unwrap()
    }

    const SENTENCE: &str = "(S (CL (NP (DET The) (N (NN man))) (VP (V (VBD hit)) (NP (DET the) (N (NN building))))))";

    #[test]
    fn test_subject_verb_object() {
        let phrases = tree(SENTENCE);
        let root = phrases.root().unwrap();
        let vp = phrases.find_all(root, "VP")[0];

        let found = phrases.constituents(vp, &verbmap("(CL (NP=subject) (VP=head (NP=directobject)))"));
        let texts: Vec<String> = found.iter().map(|c| phrases.text(c.node)).collect();
        assert_eq!(texts, vec!["The man", "hit the building", "the building"]);

        assert_eq!(found[0].tag.as_ref().unwrap().predicates(), &[Predicate::Subject]);
        assert!(found[1].tag.as_ref().unwrap().is_head());
        assert_eq!(found[1].node, vp);
    }

    #[test]
    fn test_untagged_internal_node_is_not_yielded() {
        let phrases = tree(SENTENCE);
        let root = phrases.root().unwrap();
        let vp = phrases.find_all(root, "VP")[0];

        let found = phrases.constituents(vp, &verbmap("(CL (NP) (VP (V) (NP)))"));
        let texts: Vec<String> = found.iter().map(|c| phrases.text(c.node)).collect();
        assert_eq!(texts, vec!["The man", "hit", "the building"]);
        assert!(found.iter().all(|c| c.tag.is_none()));
    }

    #[test]
    fn test_missed_label_consumes_children() {
        let phrases = tree(SENTENCE);
        let root = phrases.root().unwrap();
        let vp = phrases.find_all(root, "VP")[0];

        let found = phrases.constituents(vp, &verbmap("(CL (PP) (NP))"));
        assert!(found.is_empty());

        let found = phrases.constituents(vp, &verbmap("(CL (VP) (NP))"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].node, vp);
    }

    #[test]
    fn test_no_clause() {
        let phrases = tree("(S (VP (V run)))");
        let root = phrases.root().unwrap();
        let vp = phrases.find_all(root, "VP")[0];

        assert!(phrases.constituents(vp, &verbmap("(CL (VP=head))")).is_empty());
    }

    #[test]
    fn test_duplicates_collapse_by_identity() {
        let phrases = tree("(CL (NP (N dogs)) (VP (V chase) (NP (N dogs))))");
        let root = phrases.root().unwrap();
        let vp = phrases.find_all(root, "VP")[0];

        let found = phrases.constituents(vp, &verbmap("(CL (NP=subject) (VP=head (NP=directobject)))"));
        assert_eq!(found.len(), 3);
        assert_ne!(found[0].node, found[2].node);
        assert_eq!(phrases.text(found[0].node), phrases.text(found[2].node));
    }
}
