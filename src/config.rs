//! Configuration management
//!
//! Two layers: [`Config`] is the application config the CLI loads from a YAML
//! file merged with `LINKWEAVER_*` environment variables; [`LinkerConfig`] is
//! the engine's constraint set, embeddable on its own by library callers. A
//! caller can adjust a single pass without touching the shared base via
//! [`LinkerOverrides`].

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keyword table configuration.
    pub keywords: KeywordsConfig,
    /// Linking engine constraints.
    pub linker: LinkerConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        // Merge environment variables (LINKWEAVER_ prefix)
        figment = figment.merge(Env::prefixed("LINKWEAVER_").split("__"));

        figment.extract().map_err(|e| Error::Config(e.to_string()))
    }
}

/// Where keyword definition files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordsConfig {
    /// Directories to load keyword definitions from.
    pub directories: Vec<String>,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            directories: vec!["keywords".to_string()],
        }
    }
}

/// Constraints and heuristics for one linking pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Hard cap on links inserted into one document.
    pub max_links_per_document: usize,
    /// Hard cap on links to a single target per document. 0 means never
    /// link to any target — not an error, just "no links".
    pub max_links_per_target: usize,
    /// Minimum offset distance between two inserted links.
    pub min_char_distance_between_links: usize,
    /// Refuse positions inside `<h1>`–`<h6>` spans.
    pub avoid_headers: bool,
    /// Grant the early-placement score bonus.
    pub prefer_first_third: bool,
    /// Grant the mid-sentence score bonus.
    pub prefer_sentence_middle: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            max_links_per_document: 5,
            max_links_per_target: 2,
            min_char_distance_between_links: 150,
            avoid_headers: true,
            prefer_first_third: true,
            prefer_sentence_middle: true,
        }
    }
}

/// Partial per-call overrides, merged over a base [`LinkerConfig`].
///
/// Unset fields keep the base value, so a caller tightening one constraint
/// for a single document doesn't have to restate the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerOverrides {
    /// Override for `max_links_per_document`.
    pub max_links_per_document: Option<usize>,
    /// Override for `max_links_per_target`.
    pub max_links_per_target: Option<usize>,
    /// Override for `min_char_distance_between_links`.
    pub min_char_distance_between_links: Option<usize>,
    /// Override for `avoid_headers`.
    pub avoid_headers: Option<bool>,
    /// Override for `prefer_first_third`.
    pub prefer_first_third: Option<bool>,
    /// Override for `prefer_sentence_middle`.
    pub prefer_sentence_middle: Option<bool>,
}

impl LinkerOverrides {
    /// Produce the effective config for one pass.
    #[must_use]
    pub fn apply(&self, base: &LinkerConfig) -> LinkerConfig {
        LinkerConfig {
            max_links_per_document: self
                .max_links_per_document
                .unwrap_or(base.max_links_per_document),
            max_links_per_target: self
                .max_links_per_target
                .unwrap_or(base.max_links_per_target),
            min_char_distance_between_links: self
                .min_char_distance_between_links
                .unwrap_or(base.min_char_distance_between_links),
            avoid_headers: self.avoid_headers.unwrap_or(base.avoid_headers),
            prefer_first_third: self.prefer_first_third.unwrap_or(base.prefer_first_third),
            prefer_sentence_middle: self
                .prefer_sentence_middle
                .unwrap_or(base.prefer_sentence_middle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_usable() {
        let config = Config::default();
        assert_eq!(config.keywords.directories, vec!["keywords"]);
        assert_eq!(config.linker.max_links_per_document, 5);
        assert!(config.linker.avoid_headers);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.linker.min_char_distance_between_links, 150);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/linkweaver.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_merges_yaml_over_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("linkweaver.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r"linker:
  max_links_per_document: 3
  avoid_headers: false
keywords:
  directories:
    - tables/pets
"
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.linker.max_links_per_document, 3);
        assert!(!config.linker.avoid_headers);
        // Untouched fields keep defaults
        assert_eq!(config.linker.max_links_per_target, 2);
        assert_eq!(config.keywords.directories, vec!["tables/pets"]);
    }

    // ── overrides ───────────────────────────────────────────────────────

    #[test]
    fn empty_overrides_change_nothing() {
        let base = LinkerConfig::default();
        let merged = LinkerOverrides::default().apply(&base);
        assert_eq!(merged.max_links_per_document, base.max_links_per_document);
        assert_eq!(merged.max_links_per_target, base.max_links_per_target);
        assert_eq!(
            merged.min_char_distance_between_links,
            base.min_char_distance_between_links
        );
        assert_eq!(merged.avoid_headers, base.avoid_headers);
    }

    #[test]
    fn set_override_fields_win() {
        let base = LinkerConfig::default();
        let overrides = LinkerOverrides {
            max_links_per_document: Some(1),
            min_char_distance_between_links: Some(0),
            ..LinkerOverrides::default()
        };
        let merged = overrides.apply(&base);
        assert_eq!(merged.max_links_per_document, 1);
        assert_eq!(merged.min_char_distance_between_links, 0);
        // Unset fields keep base values
        assert_eq!(merged.max_links_per_target, base.max_links_per_target);
        assert!(merged.avoid_headers);
    }

    #[test]
    fn zero_per_target_cap_deserializes() {
        // "never link" is expressed as 0, not as an error
        let cfg: LinkerConfig = serde_yaml::from_str("max_links_per_target: 0\n").unwrap();
        assert_eq!(cfg.max_links_per_target, 0);
    }
}
