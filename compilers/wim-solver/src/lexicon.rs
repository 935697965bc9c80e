use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use wim_protocol::{Lexicon, NounClass, VerbSense};

use crate::error::LexiconError;

/// A lexicon read from a JSON file, standing in for a full lexical database.
///
/// ```json
/// { "verbs": { "hit": [ { "sense": "hit.v.01", "lemma": "hit",
///                         "frames": ["Somebody hit something"] } ] },
///   "forms": { "hitting": "hit" },
///   "nouns": { "animal": ["man"], "body_part": ["hand"] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticLexicon {
    /// Senses keyed by lemma
    #[serde(default)]
    pub verbs: BTreeMap<String, Vec<VerbSense>>,
    /// Inflected form to lemma
    #[serde(default)]
    pub forms: BTreeMap<String, String>,
    #[serde(default)]
    pub nouns: BTreeMap<NounClass, BTreeSet<String>>,
}

impl StaticLexicon {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon: Self = serde_json::from_str(&text).map_err(|source| LexiconError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), verbs = lexicon.verbs.len(), "Loaded lexicon");
        Ok(lexicon)
    }

    pub fn with_verb(mut self, word: &str, sense: &str, frames: &[&str]) -> Self {
        let lemma = word.to_lowercase();
        self.verbs.entry(lemma.clone()).or_default().push(VerbSense {
            sense: sense.to_string(),
            lemma,
            frames: frames.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    pub fn with_form(mut self, form: &str, lemma: &str) -> Self {
        self.forms.insert(form.to_lowercase(), lemma.to_lowercase());
        self
    }

    pub fn with_noun(mut self, class: NounClass, noun: &str) -> Self {
        self.nouns.entry(class).or_default().insert(noun.to_lowercase());
        self
    }
}

impl Lexicon for StaticLexicon {
    fn verb_senses(&self, verb: &str) -> Vec<VerbSense> {
        let word = verb.to_lowercase();
        let lemma = self.forms.get(&word).unwrap_or(&word);
        self.verbs
            .get(lemma)
            .or_else(|| self.verbs.get(&word))
            .cloned()
            .unwrap_or_default()
    }

    fn noun_is(&self, noun: &str, class: NounClass) -> bool {
        self.nouns
            .get(&class)
            .map_or(false, |nouns| nouns.iter().any(|known| known.eq_ignore_ascii_case(noun)))
    }
}
