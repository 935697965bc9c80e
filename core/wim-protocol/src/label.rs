use alloc::string::{String, ToString};
use core::fmt;

/// Syntactic category of a phrase node.
///
/// The engine's own categories get dedicated variants; every other label
/// (pre-terminal part-of-speech tags such as `NN` or `VBD`, `S`, `PUNCT`, ...)
/// is kept verbatim in [`Label::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Clause,
    NounPhrase,
    VerbPhrase,
    PrepPhrase,
    AdjPhrase,
    Noun,
    Verb,
    Adjective,
    Adverb,
    Conjunction,
    Determiner,
    Pronoun,
    To,
    Preposition,
    Other(String),
}

/// The closed set of phrase behaviours a label dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseKind {
    Clause,
    Noun,
    Verb,
    Prep,
    Adjective,
    /// Wraps a single token (`N`, `V`, `DET`, ...)
    Token,
    /// Any label without phrase-specific behaviour
    Base,
}

impl Label {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "CL" => Label::Clause,
            "NP" => Label::NounPhrase,
            "VP" => Label::VerbPhrase,
            "PP" => Label::PrepPhrase,
            "ADJP" => Label::AdjPhrase,
            "N" => Label::Noun,
            "V" => Label::Verb,
            "ADJ" => Label::Adjective,
            "ADV" => Label::Adverb,
            "CONJ" => Label::Conjunction,
            "DET" => Label::Determiner,
            "PRO" => Label::Pronoun,
            "TO" => Label::To,
            "PREP" => Label::Preposition,
            other => Label::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Label::Clause => "CL",
            Label::NounPhrase => "NP",
            Label::VerbPhrase => "VP",
            Label::PrepPhrase => "PP",
            Label::AdjPhrase => "ADJP",
            Label::Noun => "N",
            Label::Verb => "V",
            Label::Adjective => "ADJ",
            Label::Adverb => "ADV",
            Label::Conjunction => "CONJ",
            Label::Determiner => "DET",
            Label::Pronoun => "PRO",
            Label::To => "TO",
            Label::Preposition => "PREP",
            Label::Other(raw) => raw.as_str(),
        }
    }

    pub fn kind(&self) -> PhraseKind {
        match self {
            Label::Clause => PhraseKind::Clause,
            Label::NounPhrase => PhraseKind::Noun,
            Label::VerbPhrase => PhraseKind::Verb,
            Label::PrepPhrase => PhraseKind::Prep,
            Label::AdjPhrase => PhraseKind::Adjective,
            Label::Noun
            | Label::Verb
            | Label::Adjective
            | Label::Adverb
            | Label::Conjunction
            | Label::Determiner
            | Label::Pronoun
            | Label::To
            | Label::Preposition => PhraseKind::Token,
            Label::Other(_) => PhraseKind::Base,
        }
    }

    pub fn is(&self, raw: &str) -> bool {
        self.as_str() == raw
    }
}

impl From<&str> for Label {
    fn from(raw: &str) -> Self {
        Label::parse(raw)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_dispatch() {
        assert_eq!(Label::parse("CL").kind(), PhraseKind::Clause);
        assert_eq!(Label::parse("PREP").kind(), PhraseKind::Token);
        assert_eq!(Label::parse("NNP").kind(), PhraseKind::Base);
        assert_eq!(Label::parse("NNP"), Label::Other("NNP".to_string()));
    }

    #[test]
    fn test_label_text_is_preserved() {
        for raw in ["CL", "NP", "VP", "PP", "ADJP", "N", "V", "ADJ", "ADV", "CONJ", "DET", "PRO", "TO", "PREP", "VBG"] {
            assert_eq!(Label::parse(raw).as_str(), raw);
        }
    }
}
