use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A tree in bracketed notation: `(LABEL child child ...)`.
///
/// This is the plain, label-agnostic shape produced by the reader and stored
/// in knowledge documents. Typed behaviour lives in the phrase tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTree {
    pub label: String,
    pub children: Vec<BracketChild>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketChild {
    Tree(BracketTree),
    Leaf(String),
}

impl BracketTree {
    pub fn new(label: impl Into<String>, children: Vec<BracketChild>) -> Self {
        Self { label: label.into(), children }
    }

    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                BracketChild::Tree(tree) => tree.collect_leaves(out),
                BracketChild::Leaf(token) => out.push(token.as_str()),
            }
        }
    }

    pub fn subtrees(&self) -> impl Iterator<Item = &BracketTree> {
        self.children.iter().filter_map(|child| match child {
            BracketChild::Tree(tree) => Some(tree),
            BracketChild::Leaf(_) => None,
        })
    }
}

impl fmt::Display for BracketTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for BracketChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketChild::Tree(tree) => write!(f, "{}", tree),
            BracketChild::Leaf(token) => f.write_str(token),
        }
    }
}
