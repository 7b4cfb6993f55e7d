//! Linkweaver - contextual keyword linking for generated article text
//!
//! Reads a document, injects internal links from the configured keyword
//! tables, and writes the annotated text back out.

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use linkweaver::{
    Config, LinkEngine, LinkerOverrides,
    cli::{Cli, Command, KeywordCommand},
    index::KeywordLoader,
    setup_tracing,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup tracing
    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref()) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Command::Link {
            input,
            document_id,
            output,
            max_links,
        } => run_link(config_path, &input, &document_id, output.as_deref(), max_links),
        Command::Analyze {
            input,
            document_id,
            format,
        } => run_analyze(config_path, &input, &document_id, &format),
        Command::Keywords(cmd) => run_keywords(cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Build the engine from config file + keyword directories.
fn build_engine(config_path: Option<&Path>) -> anyhow::Result<LinkEngine> {
    let config = Config::load(config_path).context("loading configuration")?;
    let index = KeywordLoader::load_directories(&config.keywords.directories)
        .context("loading keyword tables")?;
    Ok(LinkEngine::new(index, config.linker))
}

/// Read the input document, `-` meaning stdin.
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

/// Run a linking pass and emit the annotated text.
fn run_link(
    config_path: Option<&Path>,
    input: &Path,
    document_id: &str,
    output: Option<&Path>,
    max_links: Option<usize>,
) -> anyhow::Result<()> {
    let engine = build_engine(config_path)?;
    let text = read_input(input)?;

    let overrides = LinkerOverrides {
        max_links_per_document: max_links,
        ..LinkerOverrides::default()
    };
    let annotated = engine.link_with(&text, document_id, &overrides);

    match output {
        Some(path) => {
            std::fs::write(path, &annotated)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Annotated text written");
        }
        None => print!("{annotated}"),
    }
    Ok(())
}

/// Print the audit report for a document.
fn run_analyze(
    config_path: Option<&Path>,
    input: &Path,
    document_id: &str,
    format: &str,
) -> anyhow::Result<()> {
    let engine = build_engine(config_path)?;
    let text = read_input(input)?;
    let report = engine.analyze(&text, document_id);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Document: {}", report.document_id);
    println!(
        "Words: {}   Existing anchors: {}   Link density: {:.4}",
        report.word_count, report.existing_anchor_count, report.link_density
    );
    if report.opportunities.is_empty() {
        println!("\nNo linking opportunities found.");
    } else {
        println!("\nFound {} linking opportunities:\n", report.opportunities.len());
        for opp in &report.opportunities {
            println!(
                "  {:>7.2}  {} → {} ({}×, weight {}, {})",
                opp.score,
                opp.phrase,
                opp.target,
                opp.occurrences,
                opp.weight,
                opp.intent.as_str()
            );
        }
    }
    Ok(())
}

/// Keyword table management.
fn run_keywords(cmd: KeywordCommand) -> anyhow::Result<()> {
    match cmd {
        KeywordCommand::Validate { file } => {
            let entries = KeywordLoader::load_file(&file)
                .with_context(|| format!("parsing {}", file.display()))?;
            println!("✅ {} - valid ({} keywords)", file.display(), entries.len());
            Ok(())
        }
        KeywordCommand::List { directory } => {
            let entries = KeywordLoader::load_directory(&directory)
                .with_context(|| format!("loading {}", directory.display()))?;
            if entries.is_empty() {
                println!("No keywords found in {}", directory.display());
            } else {
                println!("Found {} keywords in {}:\n", entries.len(), directory.display());
                for entry in entries {
                    println!(
                        "  {} → {} (weight {}, {})",
                        entry.phrase,
                        entry.target,
                        entry.weight,
                        entry.intent.as_str()
                    );
                }
            }
            Ok(())
        }
    }
}
