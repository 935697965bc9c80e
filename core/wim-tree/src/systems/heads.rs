use wim_protocol::PhraseKind;

use crate::{NodeId, PhraseTree, TreeError};

/// The head of a phrase.
///
/// Adjective phrases are headed by all of their adjectives at once, every
/// other phrase by at most one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Node(NodeId),
    Set(Vec<NodeId>),
    Missing,
}

impl Head {
    pub fn first(&self) -> Option<NodeId> {
        match self {
            Head::Node(id) => Some(*id),
            Head::Set(ids) => ids.first().copied(),
            Head::Missing => None,
        }
    }

    fn from_option(id: Option<NodeId>) -> Self {
        id.map(Head::Node).unwrap_or(Head::Missing)
    }
}

impl PhraseTree {
    /// Head rule by phrase kind. Tokens and unclassified phrases have none.
    pub fn head(&self, id: NodeId) -> Result<Head, TreeError> {
        let kind = self.kind(id).ok_or(TreeError::UnknownNode(id))?;

        match kind {
            PhraseKind::Clause => Ok(Head::from_option(self.find_first_child(id, "VP"))),
            PhraseKind::Noun => self.noun_head(id),
            PhraseKind::Verb => Ok(Head::from_option(
                self.descendants(id)
                    .into_iter()
                    .skip(1)
                    .find(|node| self.has_label(*node, "V")),
            )),
            PhraseKind::Prep => {
                if let Some(np) = self.find_first_child(id, "NP") {
                    return Ok(Head::Node(np));
                }
                match self.find_first_child(id, "CL") {
                    Some(clause) => self.head(clause),
                    None => Ok(Head::Missing),
                }
            }
            PhraseKind::Adjective => Ok(Head::Set(
                self.child_nodes(id)
                    .into_iter()
                    .filter(|child| self.has_label(*child, "ADJ"))
                    .collect(),
            )),
            PhraseKind::Token | PhraseKind::Base => Err(self.not_implemented("head", id)),
        }
    }

    fn noun_head(&self, id: NodeId) -> Result<Head, TreeError> {
        let noun = self
            .find_first_child(id, "N")
            .or_else(|| self.find_first_child(id, "EX"));
        if let Some(noun) = noun {
            return Ok(Head::Node(noun));
        }

        if let Some(nested) = self.find_first_child(id, "NP") {
            if let Some(head) = self.noun_head(nested)?.first() {
                return Ok(Head::Node(head));
            }
        }

        Ok(Head::from_option(
            ["EX", "DET"]
                .iter()
                .find_map(|label| self.find_first_child(id, label)),
        ))
    }

    /// Words of the head, `None` when the phrase has no head.
    pub fn head_text(&self, id: NodeId) -> Result<Option<String>, TreeError> {
        Ok(match self.head(id)? {
            Head::Node(node) => Some(self.text(node)),
            Head::Set(nodes) if !nodes.is_empty() => Some(
                nodes
                    .into_iter()
                    .map(|node| self.text(node))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            _ => None,
        })
    }

    /// Instance type of the frame built for this phrase: the head's words
    /// for noun and verb phrases, the full text otherwise.
    pub fn frame_type(&self, id: NodeId) -> String {
        match self.kind(id) {
            Some(PhraseKind::Noun) | Some(PhraseKind::Verb) => self
                .head_text(id)
                .ok()
                .flatten()
                .unwrap_or_else(|| self.text(id)),
            _ => self.text(id),
        }
    }

    pub(crate) fn not_implemented(&self, query: &'static str, id: NodeId) -> TreeError {
        TreeError::NotImplemented {
            query,
            label: self
                .label(id)
                .map(|label| label.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}
