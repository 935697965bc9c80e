use crate::{Child, NodeId, PhraseTree};

/// Tree traversal. `find_all` is recursive, `find_first_child` looks at direct
/// children only, `find_parent` walks strictly upward.
impl PhraseTree {
    /// The subtree rooted at `from`, in pre-order, `from` included.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_preorder(from, &mut out);
        out
    }

    fn collect_preorder(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in self.child_nodes(id) {
            self.collect_preorder(child, out);
        }
    }

    /// Every subtree (self included) whose label matches, in pre-order.
    pub fn find_all(&self, from: NodeId, label: &str) -> Vec<NodeId> {
        self.descendants(from)
            .into_iter()
            .filter(|id| self.has_label(*id, label))
            .collect()
    }

    pub fn find_first_child(&self, id: NodeId, label: &str) -> Option<NodeId> {
        self.child_nodes(id)
            .into_iter()
            .find(|child| self.has_label(*child, label))
    }

    /// Closest ancestor with the label; the node itself is never returned.
    pub fn find_parent(&self, id: NodeId, label: &str) -> Option<NodeId> {
        self.ancestors(id)
            .into_iter()
            .find(|ancestor| self.has_label(*ancestor, label))
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(node) = current {
            out.push(node);
            current = self.parent(node);
        }
        out
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    /// Whether `node` lies in the subtree rooted at `of` (inclusive).
    pub fn is_within(&self, node: NodeId, of: NodeId) -> bool {
        node == of || self.ancestors(node).contains(&of)
    }

    /// All other phrase children of the parent, in order.
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.parent(id) {
            Some(parent) => self
                .child_nodes(parent)
                .into_iter()
                .filter(|sibling| *sibling != id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Slot of this node in its parent's children (tokens count).
    pub fn parent_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent)
            .iter()
            .position(|child| *child == Child::Node(id))
    }

    /// Path of child slots from the root down to this node.
    pub fn tree_position(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(index) = self.parent_index(current) {
            path.push(index);
            match self.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    pub fn leaves(&self, id: NodeId) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_leaves(id, &mut out);
        out
    }

    fn collect_leaves(&self, id: NodeId, out: &mut Vec<String>) {
        for child in self.children(id) {
            match child {
                Child::Node(node) => self.collect_leaves(node, out),
                Child::Token(token) => out.push(token),
            }
        }
    }

    /// The phrase as plain words.
    pub fn text(&self, id: NodeId) -> String {
        self.leaves(id).join(" ")
    }

    /// Noun phrases under `from` that contain no other noun phrase.
    pub fn lowest_noun_phrases(&self, from: NodeId) -> Vec<NodeId> {
        self.find_all(from, "NP")
            .into_iter()
            .filter(|np| self.find_all(*np, "NP").len() == 1)
            .collect()
    }

    /// Lowest noun phrases of `from` that are not inside a prepositional
    /// phrase, excluding `from` itself.
    pub fn top_level_noun_phrases(&self, from: NodeId) -> Vec<NodeId> {
        let preps = self.find_all(from, "PP");
        self.lowest_noun_phrases(from)
            .into_iter()
            .filter(|np| *np != from)
            .filter(|np| !preps.iter().any(|pp| self.is_within(*np, *pp)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::tree;

    const SENTENCE: &str = "(S (CL (NP (DET the) (NP (N man))) (VP (VP (V hit) (NP (DET the) (NP (N building)))) (PP (PREP with) (NP (DET a) (NP (N bat)))))))";

    #[test]
    fn test_find_all_is_preorder_and_inclusive() {
        let phrases = tree(SENTENCE);
        let root = phrases.root().unwrap();

        let texts: Vec<String> = phrases
            .find_all(root, "NP")
            .into_iter()
            .map(|np| phrases.text(np))
            .collect();
        assert_eq!(texts, vec!["the man", "man", "the building", "building", "a bat", "bat"]);

        let vps = phrases.find_all(root, "VP");
        assert_eq!(phrases.find_all(vps[0], "VP"), vps);
    }

    #[test]
    fn test_first_child_is_not_recursive() {
        let phrases = tree(SENTENCE);
        let root = phrases.root().unwrap();

        assert!(phrases.find_first_child(root, "CL").is_some());
        assert!(phrases.find_first_child(root, "VP").is_none());
    }

    #[test]
    fn test_find_parent_is_strict() {
        let phrases = tree(SENTENCE);
        let root = phrases.root().unwrap();
        let vps = phrases.find_all(root, "VP");
        let clause = phrases.find_all(root, "CL")[0];

        assert_eq!(phrases.find_parent(vps[1], "VP"), Some(vps[0]));
        assert_eq!(phrases.find_parent(vps[0], "CL"), Some(clause));
        assert_eq!(phrases.find_parent(clause, "CL"), None);
    }

    #[test]
    fn test_positions() {
        let phrases = tree(SENTENCE);
        let root = phrases.root().unwrap();
        let bat = phrases.find_all(root, "N")[2];

        assert_eq!(phrases.text(bat), "bat");
        assert_eq!(phrases.tree_position(bat), vec![0, 1, 1, 1, 1, 0]);
        assert_eq!(phrases.depth(bat), 6);
        assert_eq!(phrases.tree_position(root), Vec::<usize>::new());
    }

    #[test]
    fn test_noun_phrase_helpers() {
        let phrases = tree(SENTENCE);
        let root = phrases.root().unwrap();

        let lowest: Vec<String> = phrases
            .lowest_noun_phrases(root)
            .into_iter()
            .map(|np| phrases.text(np))
            .collect();
        assert_eq!(lowest, vec!["man", "building", "bat"]);

        let top: Vec<String> = phrases
            .top_level_noun_phrases(root)
            .into_iter()
            .map(|np| phrases.text(np))
            .collect();
        assert_eq!(top, vec!["man", "building"]);
    }

    #[test]
    fn test_siblings_exclude_self() {
        let phrases = tree(SENTENCE);
        let root = phrases.root().unwrap();
        let subject = phrases.find_all(root, "NP")[0];
        let siblings = phrases.siblings(subject);

        assert_eq!(siblings.len(), 1);
        assert!(phrases.has_label(siblings[0], "VP"));
    }
}
