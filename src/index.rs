//! Keyword index: the immutable phrase → link-target table.
//!
//! The index is built once at startup (from YAML definition files or directly
//! from entries) and passed explicitly into the engine. It never changes after
//! construction, so one index can back any number of concurrent linking
//! passes. Lookups are case-insensitive and duplicate phrases resolve in
//! table order (first registration wins).
//!
//! The index deliberately does **not** filter self-links — a keyword whose
//! target equals the document being linked is excluded downstream by the
//! engine, not here.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{Error, Result};

/// Search-intent classification for a keyword phrase.
///
/// Drives both anchor phrasing (each category has its own template set) and a
/// small relevance boost for monetizable intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentCategory {
    /// Product/service research ("cat insurance").
    Commercial,
    /// Purchase-ready phrases ("buy cat insurance online").
    Transactional,
    /// Knowledge queries — the default when a table omits the field.
    #[default]
    Informational,
    /// Brand or site-section phrases.
    Navigational,
}

impl IntentCategory {
    /// Lowercase label, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::Transactional => "transactional",
            Self::Informational => "informational",
            Self::Navigational => "navigational",
        }
    }
}

/// One row of the keyword table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Phrase to match in document text (whole-word, case-insensitive).
    pub phrase: String,
    /// Opaque identifier of the page this phrase links to.
    pub target: String,
    /// Priority weight; the ranker's base score.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Search-intent category.
    #[serde(default)]
    pub intent: IntentCategory,
}

fn default_weight() -> f64 {
    1.0
}

/// A keyword definition file: `keywords:` followed by a list of entries.
#[derive(Debug, Deserialize)]
struct KeywordFile {
    keywords: Vec<KeywordEntry>,
}

/// Immutable phrase → target table, preserving registration order.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    entries: Vec<KeywordEntry>,
}

impl KeywordIndex {
    /// Build an index from entries, keeping them in the given order.
    ///
    /// Entries are not deduplicated: when the same phrase occurs twice, every
    /// lookup resolves to the earlier row.
    #[must_use]
    pub fn new(entries: Vec<KeywordEntry>) -> Self {
        Self { entries }
    }

    /// All entries, in table order.
    #[must_use]
    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for a phrase, case-insensitively.
    ///
    /// Returns the first matching row in table order, or `None` when the
    /// phrase is not registered.
    #[must_use]
    pub fn get(&self, phrase: &str) -> Option<&KeywordEntry> {
        self.entries
            .iter()
            .find(|e| e.phrase.eq_ignore_ascii_case(phrase))
    }
}

/// Validate a single keyword entry.
///
/// Rejects empty phrases/targets and non-finite weights. Weight sign is not
/// checked: a negative weight is a legal way to deprioritize a phrase.
pub fn validate_entry(entry: &KeywordEntry) -> Result<()> {
    if entry.phrase.trim().is_empty() {
        return Err(Error::Keyword("keyword phrase is empty".to_string()));
    }
    if entry.target.trim().is_empty() {
        return Err(Error::Keyword(format!(
            "keyword '{}' has an empty target",
            entry.phrase
        )));
    }
    if !entry.weight.is_finite() {
        return Err(Error::Keyword(format!(
            "keyword '{}' has a non-finite weight",
            entry.phrase
        )));
    }
    Ok(())
}

/// Loader for keyword definition files and directories.
pub struct KeywordLoader;

impl KeywordLoader {
    /// Parse and validate one keyword definition file.
    pub fn load_file(path: &Path) -> Result<Vec<KeywordEntry>> {
        let raw = std::fs::read_to_string(path)?;
        let file: KeywordFile = serde_yaml::from_str(&raw)?;
        for entry in &file.keywords {
            validate_entry(entry)?;
        }
        Ok(file.keywords)
    }

    /// Load every `*.yaml`/`*.yml` file under a directory (recursive).
    ///
    /// Files are visited in sorted path order so the resulting table order —
    /// and therefore duplicate resolution and rank tie-breaking — is stable
    /// across runs. Unparseable files are logged and skipped.
    pub fn load_directory(dir: &Path) -> Result<Vec<KeywordEntry>> {
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "keywords path is not a directory: {}",
                dir.display()
            )));
        }

        let mut entries = Vec::new();
        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));
        for item in walker {
            let item = item.map_err(|e| Error::Config(format!("walking {}: {e}", dir.display())))?;
            let path = item.path();
            if !path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                continue;
            }
            match Self::load_file(path) {
                Ok(mut file_entries) => {
                    debug!(count = file_entries.len(), path = %path.display(), "Loaded keywords");
                    entries.append(&mut file_entries);
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Failed to load keyword file");
                }
            }
        }
        Ok(entries)
    }

    /// Build an index from multiple directories, in the given order.
    ///
    /// A missing directory is logged and skipped rather than failing the
    /// whole load, so a default config works on a fresh checkout.
    pub fn load_directories(dirs: &[String]) -> Result<KeywordIndex> {
        let mut all = Vec::new();
        for dir in dirs {
            match Self::load_directory(Path::new(dir)) {
                Ok(entries) => all.extend(entries),
                Err(e) => {
                    warn!(error = %e, path = %dir, "Failed to load keywords directory");
                }
            }
        }
        info!(count = all.len(), "Keyword index loaded");
        Ok(KeywordIndex::new(all))
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.starts_with('.'))
}
