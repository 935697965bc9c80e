use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One sense of a verb, with the surface frame strings it licenses.
///
/// Frame strings carry the lemma in place, e.g. `"Somebody hit something"`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct VerbSense {
    pub sense: String,
    pub lemma: String,
    pub frames: Vec<String>,
}

/// Coarse noun categories used by the `somebody` and `bodypart` predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NounClass {
    Animal,
    BodyPart,
}

/// Lexical-semantic lookups the engine delegates to an external database.
pub trait Lexicon {
    /// Verb senses for a (possibly inflected) verb form.
    fn verb_senses(&self, verb: &str) -> Vec<VerbSense>;

    /// Whether a noun belongs to the given category.
    fn noun_is(&self, noun: &str, class: NounClass) -> bool;
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn verb_senses(&self, verb: &str) -> Vec<VerbSense> {
        (**self).verb_senses(verb)
    }

    fn noun_is(&self, noun: &str, class: NounClass) -> bool {
        (**self).noun_is(noun, class)
    }
}
