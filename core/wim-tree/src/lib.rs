pub mod components;
pub mod systems;

use std::fmt;

use hecs::{Entity, World};
use thiserror::Error;
use wim_protocol::{BracketChild, BracketTree, FrameId, Label, PhraseKind};

use components::{Children, FrameCache, Parent, Phrase};

pub use components::Child;
pub use systems::heads::Head;
pub use systems::pattern::Constituent;

/// Identity of a phrase node. Two nodes with the same text are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Entity);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0:?} does not belong to this tree")]
    UnknownNode(NodeId),
    #[error("node {0:?} already has a parent")]
    AlreadyParented(NodeId),
    #[error("attaching node {0:?} would create a cycle")]
    Cycle(NodeId),
    #[error("no {query} implemented on {label}")]
    NotImplemented { query: &'static str, label: String },
}

/// A constituency parse as typed, parent-aware phrases.
///
/// Every node is an entity; `Children` owns the order, `Parent` points back.
/// Structure is fixed once built; only the frame cache changes afterwards.
pub struct PhraseTree {
    world: World,
    root: Option<NodeId>,
}

impl PhraseTree {
    pub fn new() -> Self {
        Self { world: World::new(), root: None }
    }

    /// Builds the typed tree from bracketed notation.
    pub fn from_bracket(tree: &BracketTree) -> Result<Self, TreeError> {
        let mut phrases = Self::new();
        let root = phrases.build(tree)?;
        phrases.root = Some(root);
        Ok(phrases)
    }

    fn build(&mut self, tree: &BracketTree) -> Result<NodeId, TreeError> {
        let id = self.add_phrase(Label::parse(&tree.label));
        for child in &tree.children {
            match child {
                BracketChild::Tree(sub) => {
                    let sub_id = self.build(sub)?;
                    self.attach(id, sub_id)?;
                }
                BracketChild::Leaf(token) => self.push_token(id, token.clone())?,
            }
        }
        Ok(id)
    }

    /// Creates a detached phrase. The first phrase created becomes the root
    /// unless `set_root` says otherwise.
    pub fn add_phrase(&mut self, label: Label) -> NodeId {
        let id = NodeId(self.world.spawn((Phrase { label }, Children::default())));
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Appends `child` to `parent`. A node may be attached exactly once.
    /// Attaching the current root under another node moves the root to the
    /// top of the combined tree.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.ensure(parent)?;
        self.ensure(child)?;

        if self.parent(child).is_some() {
            return Err(TreeError::AlreadyParented(child));
        }
        let above = self.ancestors(parent);
        if child == parent || above.contains(&child) {
            return Err(TreeError::Cycle(child));
        }

        self.world
            .insert_one(child.0, Parent(parent.0))
            .map_err(|_| TreeError::UnknownNode(child))?;
        self.world
            .get::<&mut Children>(parent.0)
            .map_err(|_| TreeError::UnknownNode(parent))?
            .0
            .push(Child::Node(child));

        if self.root == Some(child) {
            self.set_root(above.last().copied().unwrap_or(parent))?;
        }
        Ok(())
    }

    pub fn push_token(&mut self, parent: NodeId, token: impl Into<String>) -> Result<(), TreeError> {
        self.world
            .get::<&mut Children>(parent.0)
            .map_err(|_| TreeError::UnknownNode(parent))?
            .0
            .push(Child::Token(token.into()));
        Ok(())
    }

    pub fn set_root(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.ensure(node)?;
        if self.parent(node).is_some() {
            return Err(TreeError::AlreadyParented(node));
        }
        self.root = Some(node);
        Ok(())
    }

    fn ensure(&self, id: NodeId) -> Result<(), TreeError> {
        if self.world.contains(id.0) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.world.contains(id.0)
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn label(&self, id: NodeId) -> Option<Label> {
        self.world.get::<&Phrase>(id.0).ok().map(|p| p.label.clone())
    }

    /// Compares without cloning the label.
    pub fn has_label(&self, id: NodeId, raw: &str) -> bool {
        self.world
            .get::<&Phrase>(id.0)
            .map(|p| p.label.is(raw))
            .unwrap_or(false)
    }

    pub fn kind(&self, id: NodeId) -> Option<PhraseKind> {
        self.world.get::<&Phrase>(id.0).ok().map(|p| p.label.kind())
    }

    pub fn children(&self, id: NodeId) -> Vec<Child> {
        self.world
            .get::<&Children>(id.0)
            .map(|c| c.0.clone())
            .unwrap_or_default()
    }

    /// Phrase children only, in order; tokens are skipped.
    pub fn child_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.world
            .get::<&Children>(id.0)
            .map(|c| c.0.iter().filter_map(Child::node).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.world.get::<&Parent>(id.0).ok().map(|p| NodeId(p.0))
    }

    pub fn frame(&self, id: NodeId) -> Option<FrameId> {
        self.world.get::<&FrameCache>(id.0).ok().map(|f| f.0)
    }

    /// Records the frame built for this phrase.
    pub fn cache_frame(&mut self, id: NodeId, frame: FrameId) -> Result<(), TreeError> {
        self.world
            .insert_one(id.0, FrameCache(frame))
            .map_err(|_| TreeError::UnknownNode(id))
    }

    /// Forgets every cached frame, so the tree can be analyzed again.
    pub fn clear_frames(&mut self) {
        let cached: Vec<Entity> = self
            .world
            .query::<&FrameCache>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in cached {
            let _ = self.world.remove_one::<FrameCache>(entity);
        }
    }

    /// Converts a subtree back into bracketed notation.
    pub fn to_bracket(&self, id: NodeId) -> BracketTree {
        let label = self.label(id).map(|l| l.as_str().to_string()).unwrap_or_default();
        let children = self
            .children(id)
            .into_iter()
            .map(|child| match child {
                Child::Node(node) => BracketChild::Tree(self.to_bracket(node)),
                Child::Token(token) => BracketChild::Leaf(token),
            })
            .collect();
        BracketTree::new(label, children)
    }
}

impl Default for PhraseTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhraseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => write!(f, "{}", self.to_bracket(root)),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for PhraseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhraseTree")
            .field("nodes", &self.len())
            .field("tree", &self.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn tree(input: &str) -> PhraseTree {
        let bracket = wim_parser::parse_tree(input).expect("test parse must be valid");
        PhraseTree::from_bracket(&bracket).expect("test tree must build")
    }

    #[test]
    fn test_build_keeps_structure() {
        let input = "(CL (NP (DET the) (N man)) (VP (V hit) (NP (DET the) (N building))))";
        let phrases = tree(input);

        assert_eq!(phrases.to_string(), input);
        assert_eq!(phrases.len(), 9);

        let root = phrases.root().unwrap();
        assert_eq!(phrases.label(root), Some(Label::Clause));
        assert!(phrases.parent(root).is_none());

        for child in phrases.child_nodes(root) {
            assert_eq!(phrases.parent(child), Some(root));
        }
    }

    #[test]
    fn test_reparenting_is_rejected() {
        let mut phrases = PhraseTree::new();
        let clause = phrases.add_phrase(Label::Clause);
        let np = phrases.add_phrase(Label::NounPhrase);
        let vp = phrases.add_phrase(Label::VerbPhrase);

        phrases.attach(clause, np).unwrap();
        assert_eq!(phrases.attach(vp, np), Err(TreeError::AlreadyParented(np)));

        phrases.attach(clause, vp).unwrap();
        assert_eq!(phrases.attach(vp, clause), Err(TreeError::Cycle(clause)));
        assert_eq!(phrases.child_nodes(clause), vec![np, vp]);
    }

    #[test]
    fn test_bottom_up_construction() {
        let mut phrases = PhraseTree::new();
        let np = phrases.add_phrase(Label::NounPhrase);
        phrases.push_token(np, "rain").unwrap();
        let vp = phrases.add_phrase(Label::VerbPhrase);
        phrases.push_token(vp, "falls").unwrap();
        let clause = phrases.add_phrase(Label::Clause);
        assert_eq!(phrases.root(), Some(np));

        phrases.attach(clause, np).unwrap();
        phrases.attach(clause, vp).unwrap();
        assert_eq!(phrases.root(), Some(clause));
        assert_eq!(phrases.to_string(), "(CL (NP rain) (VP falls))");

        // only a node without a parent can become the root
        assert_eq!(phrases.set_root(np), Err(TreeError::AlreadyParented(np)));
        let other = phrases.add_phrase(Label::Clause);
        phrases.set_root(other).unwrap();
        assert_eq!(phrases.root(), Some(other));
        assert_eq!(phrases.attach(clause, other), Ok(()));
        assert_eq!(phrases.root(), Some(clause));
    }

    #[test]
    fn test_unknown_node_is_rejected() {
        let mut other = PhraseTree::new();
        let mut foreign = other.add_phrase(Label::NounPhrase);
        for _ in 0..4 {
            foreign = other.add_phrase(Label::NounPhrase);
        }

        let mut phrases = PhraseTree::new();
        let clause = phrases.add_phrase(Label::Clause);

        assert!(!phrases.contains(foreign));
        assert_eq!(phrases.attach(clause, foreign), Err(TreeError::UnknownNode(foreign)));
    }

    #[test]
    fn test_frame_cache() {
        let mut phrases = tree("(CL (NP (N it)) (VP (V rains)))");
        let root = phrases.root().unwrap();

        assert!(phrases.frame(root).is_none());
        phrases.cache_frame(root, FrameId(3)).unwrap();
        assert_eq!(phrases.frame(root), Some(FrameId(3)));

        phrases.clear_frames();
        assert!(phrases.frame(root).is_none());
    }
}
