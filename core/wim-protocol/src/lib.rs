#![no_std] // Shared by the std engine crates and the no_std inflection crate

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod label;
pub mod tree;
pub mod pattern;
pub mod lexicon;

// Re-export core types for convenience
pub use ids::FrameId;
pub use label::{Label, PhraseKind};
pub use tree::{BracketChild, BracketTree};
pub use pattern::{FunctionalTag, Pattern, PatternError, Predicate};
pub use lexicon::{Lexicon, NounClass, VerbSense};

pub mod model;
pub use model::*;

/// Role name that marks a template position as intentionally unbound.
pub const SKIP_ROLE: &str = "X";

/// Role name that loses disambiguation ties.
pub const SCOPE_ROLE: &str = "SCOPE";

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    #[test]
    fn test_document_archive() {
        // A compiled knowledge archive must come back intact
        let original = KnowledgeDocument {
            frames: vec![FrameDefinition {
                frame: "Somebody ----s something".to_string(),
                mappings: vec![MappingRecord {
                    frame: None,
                    verbmap: "(CL (NP=subject) (VP=head (NP=directobject)))".to_string(),
                    wimtemplate: "AGENT X THEME".to_string(),
                    example: "The man hit the building".to_string(),
                    parse: None,
                }],
            }],
        };

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize document");
        let restored: KnowledgeDocument = from_bytes(&bytes).expect("Failed to deserialize document");

        assert_eq!(restored.frames.len(), 1);
        assert_eq!(restored.frames[0].frame, "Somebody ----s something");
        assert_eq!(restored.frames[0].mappings[0].wimtemplate, "AGENT X THEME");
        assert!(restored.frames[0].mappings[0].parse.is_none());
    }

    #[test]
    fn test_id_layout() {
        // FrameId(u32) must stay a zero-cost wrapper
        assert_eq!(core::mem::size_of::<FrameId>(), 4);
    }
}
