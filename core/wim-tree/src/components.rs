use hecs::Entity;
use wim_protocol::{FrameId, Label};

use crate::NodeId;

/// The syntactic category of a node (Source of Truth for dispatch)
#[derive(Debug, Clone)]
pub struct Phrase {
    pub label: Label,
}

/// One ordered child slot: a nested phrase or a literal token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Node(NodeId),
    Token(String),
}

impl Child {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Child::Node(id) => Some(*id),
            Child::Token(_) => None,
        }
    }
}

/// Owned, ordered children of a phrase
#[derive(Debug, Clone, Default)]
pub struct Children(pub Vec<Child>);

/// Back-link to the owning phrase. Inserted once, when the node is attached.
#[derive(Debug, Clone, Copy)]
pub struct Parent(pub Entity);

/// Frame assigned to this phrase during an analysis
#[derive(Debug, Clone, Copy)]
pub struct FrameCache(pub FrameId);
