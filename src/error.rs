//! Error types for linkweaver
//!
//! Only the loading surfaces (configuration, keyword tables) can fail; a
//! linking pass itself never returns an error — every anomaly degrades to
//! "fewer links inserted".

use std::io;

use thiserror::Error;

/// Result type alias for linkweaver
pub type Result<T> = std::result::Result<T, Error>;

/// Linkweaver errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Keyword table error
    #[error("Keyword table error: {0}")]
    Keyword(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
