pub mod analyzer;
pub mod disambiguate;
pub mod error;
pub mod graph;
pub mod knowledge;
pub mod lexicon;
pub mod template;

pub use analyzer::{Analysis, Analyzer, AnalyzerOptions, Diagnostic, OverrunPolicy, SenseAssignment};
pub use disambiguate::select;
pub use error::{AnalysisError, GraphError, KnowledgeError, LexiconError, Mismatch};
pub use graph::{Frame, Property, PropertyValue, WimGraph};
pub use knowledge::{ExampleFailure, ExampleReport, FrameTemplate, KnowledgeBase, KNOWLEDGE_ENV};
pub use lexicon::StaticLexicon;
pub use template::FrameMatch;
