use std::path::PathBuf;

use thiserror::Error;
use wim_parser::ParseError;
use wim_protocol::FrameId;
use wim_tree::TreeError;

/// Problems with the knowledge base. Everything except `NotFound` happens
/// at load time and is fatal.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("no knowledge base location given; set WIMKB to a frames document")]
    Unset,
    #[error("cannot read knowledge base {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed knowledge document {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid knowledge archive {path:?}: {reason}")]
    Archive { path: PathBuf, reason: String },
    #[error("frame '{frame}', mapping {index}")]
    Record {
        frame: String,
        index: usize,
        #[source]
        source: ParseError,
    },
    #[error("no frame key for '{frame}' with lemma '{lemma}'")]
    NotFound { frame: String, lemma: String },
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("cannot read lexicon {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed lexicon {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a template was excluded for a verb phrase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("verb phrase has no enclosing clause")]
    NoClause,
    #[error("pattern yields {found} constituents, frame expects {expected}")]
    Arity { expected: usize, found: usize },
    #[error("constituent {index} fails '{predicate}'")]
    PredicateFalse { index: usize, predicate: String },
    #[error("constituent {index} ({label}) has no '{predicate}' test")]
    PredicateUnsupported {
        index: usize,
        label: String,
        predicate: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("frame {0:?} is not in this graph")]
    UnknownFrame(FrameId),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("template '{frame_key}' has {roles} roles for {constituents} constituents of {verb_phrase}")]
    RoleMismatch {
        verb_phrase: String,
        frame_key: String,
        roles: usize,
        constituents: usize,
    },
}
