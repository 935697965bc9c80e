use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, preceded},
    IResult,
};
use wim_protocol::{BracketChild, BracketTree};

/// Anything that is not whitespace or a bracket: labels, `NP=subject,somebody`,
/// tokens such as `'s` or `"to"`.
fn is_atom_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')'
}

fn atom(input: &str) -> IResult<&str, &str> {
    take_while1(is_atom_char)(input)
}

fn child(input: &str) -> IResult<&str, BracketChild> {
    alt((
        map(tree, BracketChild::Tree),
        map(atom, |token: &str| BracketChild::Leaf(token.to_string())),
    ))(input)
}

/// `(LABEL child ...)`. The label may be missing, as in the outer bracket
/// of `((S ...))`.
pub fn tree(input: &str) -> IResult<&str, BracketTree> {
    let (input, _) = char('(')(input)?;
    let (input, label) = preceded(multispace0, opt(atom))(input)?;
    let (input, children) = many0(preceded(multispace0, child))(input)?;
    let (input, _) = preceded(multispace0, char(')'))(input)?;

    Ok((input, BracketTree::new(label.unwrap_or_default(), children)))
}

/// A single tree surrounded by optional whitespace.
pub fn padded_tree(input: &str) -> IResult<&str, BracketTree> {
    delimited(multispace0, tree, multispace0)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atoms_keep_tags_and_quotes() {
        let (rest, parsed) = tree("(NP=subject,token:\"to\" (POS 's))").unwrap();
        assert_eq!(rest, "");
        assert_eq!(parsed.label, "NP=subject,token:\"to\"");
        assert_eq!(parsed.to_string(), "(NP=subject,token:\"to\" (POS 's))");
    }

    #[test]
    fn test_whitespace_is_free() {
        let (rest, parsed) = tree("(CL\n  (NP (N man) )\n\t(VP (V ran)))  tail").unwrap();
        assert_eq!(rest, "  tail");
        assert_eq!(parsed.to_string(), "(CL (NP (N man)) (VP (V ran)))");
    }

    #[test]
    fn test_unlabeled_bracket() {
        let (_, parsed) = tree("( (S (NP (N it))))").unwrap();
        assert_eq!(parsed.label, "");
        assert_eq!(parsed.subtrees().count(), 1);
    }

    #[test]
    fn test_unbalanced_input_fails() {
        assert!(tree("(CL (NP (N man))").is_err());
        assert!(tree("CL (NP)").is_err());
    }
}
