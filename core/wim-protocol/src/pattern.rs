//! Constituent-map patterns.
//!
//! A pattern is written in the bracketed notation, e.g.
//! `(CL (NP=subject,somebody) (VP=head (NP=directobject)))`. A label may
//! carry a functional tag after `=`: a comma-separated list of predicate
//! names, each optionally parameterized with `:param`.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::tree::{BracketChild, BracketTree};

const TAG_DELIMITER: char = '=';
const PREDICATE_DELIMITER: char = ',';
const PARAM_DELIMITER: char = ':';

/// A named test evaluated against a bound constituent during matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Marks the head slot; never evaluated
    Head,
    Something,
    Somebody,
    Possessive,
    BodyPart,
    Subject,
    DirectObject,
    IndirectObject,
    Infinitive,
    Gerund,
    /// Literal text test, e.g. `token:"to"`
    Token(String),
    /// A name no phrase exposes; always fails the match
    Unknown { name: String, parameter: Option<String> },
}

impl Predicate {
    pub fn parse(spec: &str) -> Self {
        let (name, parameter) = match spec.split_once(PARAM_DELIMITER) {
            Some((name, param)) => (name.trim(), Some(param)),
            None => (spec.trim(), None),
        };

        match (name, parameter) {
            ("head", _) => Predicate::Head,
            ("something", _) => Predicate::Something,
            ("somebody", _) => Predicate::Somebody,
            // Knowledge files in the wild use the misspelling
            ("possessive", _) | ("possesive", _) => Predicate::Possessive,
            ("bodypart", _) => Predicate::BodyPart,
            ("subject", _) => Predicate::Subject,
            ("directobject", _) => Predicate::DirectObject,
            ("indirectobject", _) => Predicate::IndirectObject,
            ("infinitive", _) => Predicate::Infinitive,
            ("gerund", _) => Predicate::Gerund,
            ("token", Some(param)) => Predicate::Token(param.to_string()),
            (name, parameter) => Predicate::Unknown {
                name: name.to_string(),
                parameter: parameter.map(|p| p.to_string()),
            },
        }
    }

    pub fn is_head(&self) -> bool {
        matches!(self, Predicate::Head)
    }

    pub fn name(&self) -> &str {
        match self {
            Predicate::Head => "head",
            Predicate::Something => "something",
            Predicate::Somebody => "somebody",
            Predicate::Possessive => "possessive",
            Predicate::BodyPart => "bodypart",
            Predicate::Subject => "subject",
            Predicate::DirectObject => "directobject",
            Predicate::IndirectObject => "indirectobject",
            Predicate::Infinitive => "infinitive",
            Predicate::Gerund => "gerund",
            Predicate::Token(_) => "token",
            Predicate::Unknown { name, .. } => name.as_str(),
        }
    }
}

/// The functional tag attached to a pattern label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalTag {
    raw: String,
    predicates: Vec<Predicate>,
}

impl FunctionalTag {
    pub fn parse(raw: &str) -> Self {
        let predicates = raw
            .split(PREDICATE_DELIMITER)
            .filter(|spec| !spec.trim().is_empty())
            .map(Predicate::parse)
            .collect();
        Self { raw: raw.to_string(), predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_head(&self) -> bool {
        self.predicates.iter().any(Predicate::is_head)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for FunctionalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Splits `NP=subject` into `("NP", Some("subject"))`.
pub fn split_label(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once(TAG_DELIMITER) {
        Some((label, tag)) => (label, Some(tag)),
        None => (raw, None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Patterns are made of labels only; a bare token has no meaning
    BareToken { parent: String, token: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::BareToken { parent, token } => {
                write!(f, "bare token '{}' under pattern node '{}'", token, parent)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PatternError {}

/// One node of a constituent map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub label: String,
    pub tag: Option<FunctionalTag>,
    pub children: Vec<Pattern>,
}

impl Pattern {
    pub fn from_bracket(tree: &BracketTree) -> Result<Self, PatternError> {
        let (label, tag) = split_label(&tree.label);

        let mut children = Vec::with_capacity(tree.children.len());
        for child in &tree.children {
            match child {
                BracketChild::Tree(sub) => children.push(Pattern::from_bracket(sub)?),
                BracketChild::Leaf(token) => {
                    return Err(PatternError::BareToken {
                        parent: tree.label.clone(),
                        token: token.clone(),
                    })
                }
            }
        }

        Ok(Self {
            label: label.to_string(),
            tag: tag.map(FunctionalTag::parse),
            children,
        })
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label)?;
        if let Some(tag) = &self.tag {
            write!(f, "{}{}", TAG_DELIMITER, tag)?;
        }
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn node(label: &str, children: Vec<BracketTree>) -> BracketTree {
        BracketTree::new(label, children.into_iter().map(BracketChild::Tree).collect())
    }

    #[test]
    fn test_tag_parsing() {
        let tag = FunctionalTag::parse("subject,somebody");
        assert_eq!(tag.predicates(), &[Predicate::Subject, Predicate::Somebody]);

        let tag = FunctionalTag::parse("token:\"to\"");
        assert_eq!(tag.predicates(), &[Predicate::Token("\"to\"".to_string())]);

        assert_eq!(Predicate::parse("possesive"), Predicate::Possessive);
        assert!(matches!(Predicate::parse("flies"), Predicate::Unknown { .. }));
        assert!(FunctionalTag::parse("head").is_head());
    }

    #[test]
    fn test_pattern_from_bracket() {
        let tree = node(
            "CL",
            vec![
                node("NP=subject", vec![]),
                node("VP=head", vec![node("NP=directobject", vec![])]),
            ],
        );

        let pattern = Pattern::from_bracket(&tree).expect("valid pattern");
        assert_eq!(pattern.label, "CL");
        assert!(pattern.tag.is_none());
        assert_eq!(pattern.children[1].label, "VP");
        assert!(pattern.children[1].tag.as_ref().map(FunctionalTag::is_head).unwrap_or(false));
        assert!(pattern.children[0].is_leaf());
        assert_eq!(pattern.to_string(), "(CL (NP=subject) (VP=head (NP=directobject)))");
    }

    #[test]
    fn test_pattern_rejects_tokens() {
        let tree = BracketTree::new("NP", vec![BracketChild::Leaf("man".to_string())]);
        assert!(matches!(Pattern::from_bracket(&tree), Err(PatternError::BareToken { .. })));
    }
}
