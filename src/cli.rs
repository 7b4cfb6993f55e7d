//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Linkweaver - contextual keyword linking for generated article text
#[derive(Parser, Debug)]
#[command(name = "linkweaver")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "LINKWEAVER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        default_value = "info",
        env = "LINKWEAVER_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "LINKWEAVER_LOG_FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inject contextual links into a document
    Link {
        /// Input text file, or `-` for stdin
        #[arg(required = true)]
        input: PathBuf,

        /// Identifier of the page the text belongs to (self-links excluded)
        #[arg(short, long)]
        document_id: String,

        /// Write annotated text here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the document-wide link cap for this run
        #[arg(long)]
        max_links: Option<usize>,
    },

    /// Report ranked linking opportunities without mutating the text
    Analyze {
        /// Input text file, or `-` for stdin
        #[arg(required = true)]
        input: PathBuf,

        /// Identifier of the page the text belongs to
        #[arg(short, long)]
        document_id: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Keyword table management commands
    #[command(subcommand)]
    Keywords(KeywordCommand),
}

/// Keyword table subcommands
#[derive(Subcommand, Debug)]
pub enum KeywordCommand {
    /// Validate a keyword definition file
    Validate {
        /// Path to keyword YAML file
        #[arg(required = true)]
        file: PathBuf,
    },

    /// List keywords in a directory
    List {
        /// Directory containing keyword definitions
        #[arg(default_value = "keywords")]
        directory: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_link_command() {
        let cli = Cli::try_parse_from([
            "linkweaver",
            "link",
            "article.txt",
            "--document-id",
            "cat-insurance",
        ])
        .unwrap();
        match cli.command {
            Command::Link {
                input, document_id, ..
            } => {
                assert_eq!(input, PathBuf::from("article.txt"));
                assert_eq!(document_id, "cat-insurance");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_analyze_with_format() {
        let cli = Cli::try_parse_from([
            "linkweaver",
            "analyze",
            "-",
            "--document-id",
            "page",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Command::Analyze { format, .. } => assert_eq!(format, "json"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_keywords_subcommands() {
        let cli = Cli::try_parse_from(["linkweaver", "keywords", "list"]).unwrap();
        match cli.command {
            Command::Keywords(KeywordCommand::List { directory }) => {
                assert_eq!(directory, PathBuf::from("keywords"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn document_id_is_required_for_link() {
        assert!(Cli::try_parse_from(["linkweaver", "link", "article.txt"]).is_err());
    }
}
