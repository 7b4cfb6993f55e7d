//! Linkweaver Library
//!
//! Contextual keyword-linking engine: injects internal hyperlinks into
//! machine-generated article text so a large corpus of near-duplicate
//! documents forms a navigable link graph without manual editing.
//!
//! # Pipeline
//!
//! ```text
//! text + document id
//!       │
//!       ▼
//! keyword index ──▶ locate ──▶ rank ──▶ loop: filter ──▶ score ──▶ anchor ──▶ splice
//!                                                                              │
//!                                                                              ▼
//!                                                                  annotated text
//! ```
//!
//! The index and configuration are immutable shared inputs; each linking pass
//! owns its document buffer exclusively and leaves nothing behind. See
//! [`engine::LinkEngine`] for the entry points.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analyze;
pub mod anchor;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod index;
pub mod locate;
pub mod rank;
pub mod score;

pub use analyze::LinkReport;
pub use config::{Config, LinkerConfig, LinkerOverrides};
pub use engine::LinkEngine;
pub use error::{Error, Result};
pub use index::{IntentCategory, KeywordEntry, KeywordIndex, KeywordLoader};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber.with(fmt::layer().json()).init();
        }
        _ => {
            subscriber.with(fmt::layer()).init();
        }
    }

    Ok(())
}
