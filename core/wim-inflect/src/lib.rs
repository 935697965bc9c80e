#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[cfg(all(feature = "std", not(test)))]
extern crate std;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use core::fmt;

/// Multi-word surface tokens that count as one slot.
const COMPOUND_TOKENS: &[(&str, &str)] = &[("body part", "body-part")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inflection {
    /// `Somebody ----s something`
    ThirdPersonSingular,
    /// `It is ----ing`
    Gerund,
}

impl Inflection {
    /// Lookup order used by the knowledge base.
    pub const ALL: [Inflection; 2] = [Inflection::ThirdPersonSingular, Inflection::Gerund];

    pub fn slot(self) -> &'static str {
        match self {
            Inflection::ThirdPersonSingular => "----s",
            Inflection::Gerund => "----ing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InflectError {
    EmptyLemma,
    LemmaNotInFrame { lemma: String, frame: String },
}

impl fmt::Display for InflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InflectError::EmptyLemma => write!(f, "Cannot build a frame key from an empty lemma"),
            InflectError::LemmaNotInFrame { lemma, frame } => {
                write!(f, "Lemma '{}' does not occur in frame '{}'", lemma, frame)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InflectError {}

/// Replaces the lemma in a surface frame string with the inflected slot.
///
/// Gerund frames come out of the lexicon already suffixed (`It is raining`
/// for lemma `rain`), so the doubled `----inging` is folded back.
pub fn frame_key(surface: &str, lemma: &str, inflection: Inflection) -> Result<String, InflectError> {
    if lemma.is_empty() {
        return Err(InflectError::EmptyLemma);
    }
    if !surface.contains(lemma) {
        return Err(InflectError::LemmaNotInFrame {
            lemma: lemma.to_string(),
            frame: surface.to_string(),
        });
    }

    let key = surface.replace(lemma, inflection.slot());
    Ok(match inflection {
        Inflection::Gerund => key.replace("----inging", "----ing"),
        Inflection::ThirdPersonSingular => key,
    })
}

/// Candidate keys in lookup order.
pub fn candidate_keys(surface: &str, lemma: &str) -> Result<Vec<String>, InflectError> {
    Inflection::ALL
        .iter()
        .map(|inflection| frame_key(surface, lemma, *inflection))
        .collect()
}

/// Splits a frame key into its slots, keeping compounds like `body part` whole.
pub fn surface_tokens(frame: &str) -> Vec<String> {
    let mut joined = frame.to_string();
    for (compound, glued) in COMPOUND_TOKENS {
        joined = joined.replace(compound, glued);
    }

    joined
        .split(' ')
        .map(|token| {
            let mut token = token.to_string();
            for (compound, glued) in COMPOUND_TOKENS {
                token = token.replace(glued, compound);
            }
            token
        })
        .collect()
}

/// Number of constituents a frame expects.
pub fn arity(frame: &str) -> usize {
    surface_tokens(frame).len()
}
