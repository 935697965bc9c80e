use rkyv::{Archive, Deserialize, Serialize};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One mapping record of a frame definition, as written in the knowledge file.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct MappingRecord {
    /// Filled from the enclosing definition when absent
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub frame: Option<String>,
    pub verbmap: String,
    pub wimtemplate: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub example: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub parse: Option<String>,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct FrameDefinition {
    pub frame: String,
    pub mappings: Vec<MappingRecord>,
}

/// The whole knowledge resource: `{ "frames": [ ... ] }`.
#[derive(Debug, Clone, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct KnowledgeDocument {
    pub frames: Vec<FrameDefinition>,
}

impl KnowledgeDocument {
    pub fn record_count(&self) -> usize {
        self.frames.iter().map(|f| f.mappings.len()).sum()
    }
}
