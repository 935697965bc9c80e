use wim_protocol::PhraseKind;

use crate::{Head, NodeId, PhraseTree, TreeError};

/// Grammatical roles around a verb phrase. These are positional heuristics:
/// the first sibling NP is the subject, objects follow the head.
impl PhraseTree {
    pub fn subject(&self, vp: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.ensure_verb_phrase("subject", vp)?;
        Ok(self
            .siblings(vp)
            .into_iter()
            .find(|sibling| self.has_label(*sibling, "NP")))
    }

    pub fn direct_object(&self, vp: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.ensure_verb_phrase("direct_object", vp)?;

        for child in self.after_head(vp)? {
            if ["NP", "ADJP", "VP"].iter().any(|label| self.has_label(child, label)) {
                return Ok(Some(child));
            }
            if self.has_label(child, "PP") || self.has_label(child, "CL") {
                return Ok(self.head(child)?.first());
            }
        }
        Ok(None)
    }

    pub fn indirect_object(&self, vp: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.ensure_verb_phrase("indirect_object", vp)?;

        if let Some(pp) = self
            .after_head(vp)?
            .into_iter()
            .find(|child| self.has_label(*child, "PP"))
        {
            return Ok(self.head(pp)?.first());
        }

        let children = self.child_nodes(vp);
        let object = match self.direct_object(vp)? {
            Some(object) => object,
            None => return Ok(None),
        };
        let position = match children.iter().position(|child| *child == object) {
            Some(position) => position,
            None => return Ok(None),
        };

        Ok(children[position + 1..]
            .iter()
            .copied()
            .find(|child| self.has_label(*child, "NP") || self.has_label(*child, "ADJP")))
    }

    /// Phrase children that come after the child holding the head verb.
    fn after_head(&self, vp: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let head = match self.head(vp)? {
            Head::Node(head) => head,
            _ => return Ok(Vec::new()),
        };

        let children = self.child_nodes(vp);
        Ok(match children.iter().position(|child| self.is_within(head, *child)) {
            Some(position) => children[position + 1..].to_vec(),
            None => Vec::new(),
        })
    }

    fn ensure_verb_phrase(&self, query: &'static str, id: NodeId) -> Result<(), TreeError> {
        match self.kind(id) {
            Some(PhraseKind::Verb) => Ok(()),
            Some(_) => Err(self.not_implemented(query, id)),
            None => Err(TreeError::UnknownNode(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::tree;

    fn words(phrases: &PhraseTree, id: Option<NodeId>) -> Option<String> {
        id.map(|node| phrases.text(node))
    }

    #[test]
    fn test_transitive_roles() {
        let phrases = tree("(S (CL (NP (DET The) (N (NN man))) (VP (V (VBD hit)) (NP (DET the) (N (NN building))))))");
        let root = phrases.root().unwrap();
        let vp = phrases.find_all(root, "VP")[0];

        assert_eq!(words(&phrases, phrases.subject(vp).unwrap()).as_deref(), Some("The man"));
        assert_eq!(words(&phrases, phrases.direct_object(vp).unwrap()).as_deref(), Some("the building"));
        assert_eq!(phrases.indirect_object(vp).unwrap(), None);
    }

    #[test]
    fn test_ditransitive_roles() {
        let phrases = tree("(CL (NP (N John)) (VP (V gave) (NP (N Mary)) (NP (DET a) (N book))))");
        let root = phrases.root().unwrap();
        let vp = phrases.find_all(root, "VP")[0];

        assert_eq!(words(&phrases, phrases.direct_object(vp).unwrap()).as_deref(), Some("Mary"));
        assert_eq!(words(&phrases, phrases.indirect_object(vp).unwrap()).as_deref(), Some("a book"));
    }

    #[test]
    fn test_prepositional_objects() {
        let phrases = tree("(CL (NP (N she)) (VP (V put) (NP (DET the) (N cup)) (PP (PREP on) (NP (DET the) (N table)))))");
        let root = phrases.root().unwrap();
        let vp = phrases.find_all(root, "VP")[0];

        assert_eq!(words(&phrases, phrases.direct_object(vp).unwrap()).as_deref(), Some("the cup"));
        assert_eq!(words(&phrases, phrases.indirect_object(vp).unwrap()).as_deref(), Some("the table"));

        let phrases = tree("(CL (NP (N she)) (VP (V looked) (PP (PREP at) (NP (N him)))))");
        let root = phrases.root().unwrap();
        let vp = phrases.find_all(root, "VP")[0];
        assert_eq!(words(&phrases, phrases.direct_object(vp).unwrap()).as_deref(), Some("him"));
    }

    #[test]
    fn test_nested_head_is_skipped() {
        let phrases = tree("(CL (VP (VP (V hit) (NP (N it))) (NP (N today))))");
        let root = phrases.root().unwrap();
        let outer = phrases.find_all(root, "VP")[0];

        assert_eq!(words(&phrases, phrases.direct_object(outer).unwrap()).as_deref(), Some("today"));
        assert_eq!(phrases.subject(outer).unwrap(), None);
    }

    #[test]
    fn test_roles_need_a_verb_phrase() {
        let phrases = tree("(CL (NP (N it)) (VP (V rains)))");
        let root = phrases.root().unwrap();
        let np = phrases.find_all(root, "NP")[0];

        assert!(matches!(
            phrases.subject(np),
            Err(TreeError::NotImplemented { query: "subject", .. })
        ));
    }
}
