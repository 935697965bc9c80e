//! Penn Treebank parses to the engine's label set.

use wim_protocol::{BracketChild, BracketTree};

const ROOTS: &[&str] = &["ROOT"];
const CLAUSES: &[&str] = &["S", "SBAR", "SBARQ", "SINV", "SQ"];
const PUNCTUATION: &[&str] = &[".", "!", "?"];
const COMMAS: &[&str] = &[","];

/// Pre-terminal tags that get wrapped in a generic token phrase.
const WRAPPINGS: &[(&str, &[&str])] = &[
    ("N", &["NN", "NNS", "NNP", "NNPS", "PRP"]),
    ("V", &["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"]),
    ("ADV", &["RB", "RBR", "RBS"]),
    ("ADJ", &["JJ", "JJR", "JJS"]),
];

/// Children with these labels keep their parent from being flattened.
const FLATTEN_STOPS: &[&str] = &["CC"];

/// Relabels a Penn Treebank parse.
///
/// `ROOT` becomes `S`, every clause-level label becomes `CL` (a bare `S` at
/// the top included), sentence punctuation becomes `PUNCT` and `,` becomes `COMMA`. Functional
/// suffixes (`NP-TMP`) are dropped. Nouns, verbs, adverbs and adjectives are
/// wrapped, so `(NN man)` turns into `(N (NN man))`.
pub fn penn_to_wim(tree: &BracketTree) -> BracketTree {
    convert(tree)
}

fn convert(tree: &BracketTree) -> BracketTree {
    let children = tree
        .children
        .iter()
        .map(|child| match child {
            BracketChild::Tree(sub) => BracketChild::Tree(match wrapper(&sub.label) {
                Some(wrap) => {
                    let inner = convert(sub);
                    BracketTree::new(
                        wrap,
                        vec![BracketChild::Tree(BracketTree::new(sub.label.clone(), inner.children))],
                    )
                }
                None => convert(sub),
            }),
            BracketChild::Leaf(token) => BracketChild::Leaf(token.clone()),
        })
        .collect();

    BracketTree::new(relabel(&tree.label), children)
}

fn relabel(raw: &str) -> String {
    let label = strip_function(raw);

    if ROOTS.contains(&label) {
        return "S".to_string();
    }
    if CLAUSES.contains(&label) {
        return "CL".to_string();
    }
    if PUNCTUATION.contains(&label) {
        return "PUNCT".to_string();
    }
    if COMMAS.contains(&label) {
        return "COMMA".to_string();
    }
    label.to_string()
}

/// `NP-TMP` to `NP`. A label that is only dashes (`-NONE-`, `-LRB-`) is kept.
fn strip_function(raw: &str) -> &str {
    match raw.split('-').next() {
        Some(head) if !head.is_empty() => head,
        _ => raw,
    }
}

fn wrapper(label: &str) -> Option<&'static str> {
    WRAPPINGS
        .iter()
        .find(|(_, tags)| tags.contains(&label))
        .map(|(wrap, _)| *wrap)
}

/// Merges every child that repeats its parent's label into the parent,
/// unless the parent coordinates (has a `CC` child). One level per node:
/// `(NP (NP (NP x)))` becomes `(NP (NP x))`.
pub fn flatten(tree: &BracketTree) -> BracketTree {
    let coordinated = tree
        .subtrees()
        .any(|sub| FLATTEN_STOPS.contains(&sub.label.as_str()));

    let mut merged: Vec<BracketChild> = Vec::with_capacity(tree.children.len());
    for child in &tree.children {
        match child {
            BracketChild::Tree(sub) if !coordinated && sub.label == tree.label => {
                merged.extend(sub.children.iter().cloned())
            }
            other => merged.push(other.clone()),
        }
    }

    let children = merged
        .into_iter()
        .map(|child| match child {
            BracketChild::Tree(sub) => BracketChild::Tree(flatten(&sub)),
            leaf => leaf,
        })
        .collect();

    BracketTree::new(tree.label.clone(), children)
}

/// Normalization followed by flattening, the form the analyzer expects.
pub fn prepare(tree: &BracketTree) -> BracketTree {
    flatten(&penn_to_wim(tree))
}
