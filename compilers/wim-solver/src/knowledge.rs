use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rkyv::AlignedVec;
use tracing::{debug, info};
use wim_parser::{parse_pattern, parse_tree};
use wim_protocol::{BracketTree, KnowledgeDocument, Lexicon, Pattern, SCOPE_ROLE};
use wim_tree::PhraseTree;

use crate::error::KnowledgeError;

/// Environment variable naming the knowledge document.
pub const KNOWLEDGE_ENV: &str = "WIMKB";

/// One verb-frame rule.
#[derive(Debug, Clone)]
pub struct FrameTemplate {
    /// Normalized gloss, e.g. `Somebody ----s something`
    pub frame_key: String,
    pub constituent_map: Pattern,
    /// Index-aligned with the constituents; `X` marks a skipped position
    pub role_template: Vec<String>,
    pub example: String,
    pub reference_parse: Option<BracketTree>,
    arity: usize,
}

impl FrameTemplate {
    pub fn new(frame_key: impl Into<String>, constituent_map: Pattern, roles: &str) -> Self {
        let frame_key = frame_key.into();
        let arity = wim_inflect::arity(&frame_key);
        Self {
            frame_key,
            constituent_map,
            role_template: roles.split_whitespace().map(str::to_string).collect(),
            example: String::new(),
            reference_parse: None,
            arity,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>, parse: Option<BracketTree>) -> Self {
        self.example = example.into();
        self.reference_parse = parse;
        self
    }

    /// Constituents a match must yield: the words of the frame key.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role_template.iter().any(|r| r == role)
    }

    pub fn is_scoped(&self) -> bool {
        self.has_role(SCOPE_ROLE)
    }
}

/// Frame key to templates, in document order. Read-only once built, so one
/// instance can serve any number of analyses.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    templates: BTreeMap<String, Vec<FrameTemplate>>,
}

impl KnowledgeBase {
    /// Loads from the path in `$WIMKB`.
    pub fn from_env() -> Result<Self, KnowledgeError> {
        Self::load_from(std::env::var_os(KNOWLEDGE_ENV).map(PathBuf::from))
    }

    /// Loads from `path`; a missing or empty path is a configuration error.
    pub fn load_from(path: Option<PathBuf>) -> Result<Self, KnowledgeError> {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::load(path),
            _ => Err(KnowledgeError::Unset),
        }
    }

    /// Reads a JSON document, or a compiled archive when the extension is
    /// `.rkyv`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let document = if path.extension().map_or(false, |ext| ext == "rkyv") {
            read_archive(path)?
        } else {
            read_json(path)?
        };

        let knowledge = Self::from_document(&document)?;
        info!(
            path = %path.display(),
            keys = knowledge.len(),
            templates = knowledge.template_count(),
            "Loaded knowledge base"
        );
        Ok(knowledge)
    }

    /// Parses every record's patterns. The first malformed record aborts.
    pub fn from_document(document: &KnowledgeDocument) -> Result<Self, KnowledgeError> {
        let mut knowledge = Self::default();

        for definition in &document.frames {
            for (index, record) in definition.mappings.iter().enumerate() {
                let record_error = |source| KnowledgeError::Record {
                    frame: definition.frame.clone(),
                    index,
                    source,
                };

                let verbmap = parse_pattern(&record.verbmap).map_err(record_error)?;
                let parse = match &record.parse {
                    Some(raw) => Some(parse_tree(raw).map_err(record_error)?),
                    None => None,
                };
                let surface = record.frame.as_deref().unwrap_or(&definition.frame);

                let template = FrameTemplate::new(surface, verbmap, &record.wimtemplate)
                    .with_example(record.example.clone(), parse);
                knowledge.insert(&definition.frame, template);
            }
        }
        Ok(knowledge)
    }

    pub fn insert(&mut self, key: &str, template: FrameTemplate) {
        self.templates.entry(key.to_string()).or_default().push(template);
    }

    /// Templates for a lexicon frame string such as `Somebody hit something`,
    /// trying the `----s` key before the `----ing` key.
    pub fn lookup(&self, surface: &str, lemma: &str) -> Result<&[FrameTemplate], KnowledgeError> {
        let not_found = || KnowledgeError::NotFound {
            frame: surface.to_string(),
            lemma: lemma.to_string(),
        };

        let keys = wim_inflect::candidate_keys(surface, lemma).map_err(|err| {
            debug!(%err, "Cannot derive a frame key");
            not_found()
        })?;

        keys.iter()
            .find_map(|key| self.templates.get(key))
            .map(Vec::as_slice)
            .ok_or_else(not_found)
    }

    pub fn get(&self, key: &str) -> Option<&[FrameTemplate]> {
        self.templates.get(key).map(Vec::as_slice)
    }

    pub fn templates(&self) -> impl Iterator<Item = &FrameTemplate> {
        self.templates.values().flatten()
    }

    /// Number of distinct frame keys.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn template_count(&self) -> usize {
        self.templates.values().map(Vec::len).sum()
    }

    /// Matches every template that carries a reference parse against the
    /// first verb phrase of that parse.
    pub fn check_examples(&self, lexicon: &dyn Lexicon) -> ExampleReport {
        let mut report = ExampleReport::default();

        for template in self.templates() {
            let parse = match &template.reference_parse {
                Some(parse) => parse,
                None => continue,
            };
            report.checked += 1;

            let outcome = PhraseTree::from_bracket(parse)
                .map_err(|err| err.to_string())
                .and_then(|tree| {
                    let root = tree.root().ok_or_else(|| "empty parse".to_string())?;
                    let vp = tree
                        .find_all(root, "VP")
                        .into_iter()
                        .next()
                        .ok_or_else(|| "parse has no verb phrase".to_string())?;
                    template
                        .matches(&tree, vp, lexicon)
                        .map(|_| ())
                        .map_err(|mismatch| mismatch.to_string())
                });

            match outcome {
                Ok(()) => report.passed += 1,
                Err(reason) => report.failures.push(ExampleFailure {
                    frame_key: template.frame_key.clone(),
                    example: template.example.clone(),
                    reason,
                }),
            }
        }
        report
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleReport {
    pub checked: usize,
    pub passed: usize,
    pub failures: Vec<ExampleFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFailure {
    pub frame_key: String,
    pub example: String,
    pub reason: String,
}

fn read_json(path: &Path) -> Result<KnowledgeDocument, KnowledgeError> {
    let text = fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| KnowledgeError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_archive(path: &Path) -> Result<KnowledgeDocument, KnowledgeError> {
    let bytes = fs::read(path).map_err(|source| KnowledgeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // validation needs the archive at its natural alignment
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(&bytes);

    rkyv::from_bytes::<KnowledgeDocument>(&aligned).map_err(|err| KnowledgeError::Archive {
        path: path.to_path_buf(),
        reason: format!("{:?}", err),
    })
}
