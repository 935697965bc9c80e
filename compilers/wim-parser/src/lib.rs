pub mod normalize;
pub mod parser;

use thiserror::Error;
use wim_protocol::{BracketChild, BracketTree, Pattern, PatternError};

pub use normalize::{flatten, penn_to_wim, prepare};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input, expected a bracketed tree")]
    Empty,
    #[error("malformed tree at offset {offset}")]
    Malformed { offset: usize },
    #[error("unexpected input after the tree at offset {offset}")]
    Trailing { offset: usize },
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Reads exactly one bracketed tree.
///
/// An unlabeled outer bracket around a single tree, as some parsers emit
/// (`((S ...))`), is dropped.
pub fn parse_tree(input: &str) -> Result<BracketTree, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let (rest, tree) = parser::padded_tree(input).map_err(|e| malformed(input, e))?;
    if !rest.is_empty() {
        return Err(ParseError::Trailing { offset: input.len() - rest.len() });
    }
    Ok(unwrap_anonymous(tree))
}

/// Reads a constituent map such as `(CL (NP=subject) (VP=head))`.
pub fn parse_pattern(input: &str) -> Result<Pattern, ParseError> {
    let tree = parse_tree(input)?;
    Ok(Pattern::from_bracket(&tree)?)
}

fn unwrap_anonymous(tree: BracketTree) -> BracketTree {
    if !tree.label.is_empty() || tree.children.len() != 1 {
        return tree;
    }
    match tree.children.into_iter().next() {
        Some(BracketChild::Tree(inner)) => inner,
        Some(leaf) => BracketTree::new(String::new(), vec![leaf]),
        None => BracketTree::new(String::new(), Vec::new()),
    }
}

fn malformed(input: &str, err: nom::Err<nom::error::Error<&str>>) -> ParseError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => ParseError::Malformed {
            offset: input.len() - e.input.len(),
        },
        nom::Err::Incomplete(_) => ParseError::Malformed { offset: input.len() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree() {
        let tree = parse_tree("  (CL (NP (N man)) (VP (V ran)))\n").unwrap();
        assert_eq!(tree.label, "CL");
        assert_eq!(tree.leaves(), vec!["man", "ran"]);
    }

    #[test]
    fn test_anonymous_root_is_dropped() {
        let tree = parse_tree("((S (NP (N it))))").unwrap();
        assert_eq!(tree.to_string(), "(S (NP (N it)))");
    }

    #[test]
    fn test_errors_carry_offsets() {
        assert_eq!(parse_tree(" \n"), Err(ParseError::Empty));
        assert_eq!(parse_tree("(A x) (B y)"), Err(ParseError::Trailing { offset: 6 }));
        assert!(matches!(parse_tree("(A (B x)"), Err(ParseError::Malformed { .. })));
    }

    #[test]
    fn test_parse_pattern() {
        let pattern = parse_pattern("(CL (NP=subject,somebody) (VP=head (NP=directobject)))").unwrap();
        assert_eq!(pattern.children.len(), 2);
        assert_eq!(pattern.children[1].children.len(), 1);

        assert!(matches!(parse_pattern("(CL (NP man))"), Err(ParseError::Pattern(_))));
    }
}
