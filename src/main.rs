//! # Outline Loader CLI (`outline-loader`)
//!
//! Dumps an Outline knowledge base as JSON records for downstream indexing.
//!
//! ## Usage
//!
//! ```bash
//! outline-loader --config ./config/outline.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `outline-loader load` | Load every document and print one JSON record per line |
//! | `outline-loader load --format json` | Load every document and print a JSON array |
//! | `outline-loader collections` | List the collections a load would scan |
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=outline_loader=debug`).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use outline_loader::collections::resolve_collections;
use outline_loader::config::load_config;
use outline_loader::OutlineLoader;

/// Load the document corpus of an Outline knowledge base.
#[derive(Parser)]
#[command(name = "outline-loader", version)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/outline.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load all documents and print them as JSON.
    ///
    /// The load is all-or-nothing for `--format json`. With `jsonl` records
    /// are streamed as they are assembled and the command exits non-zero
    /// on the first error.
    Load {
        /// Restrict the scan to these collection IDs (overrides the config).
        #[arg(long = "collection")]
        collections: Vec<String>,

        #[arg(long, value_enum, default_value_t = Format::Jsonl)]
        format: Format,
    },

    /// List the collections that would be scanned.
    Collections,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Jsonl,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;

    match cli.command {
        Commands::Load {
            collections,
            format,
        } => {
            if !collections.is_empty() {
                config = config.with_collection_ids(collections);
            }
            let loader = OutlineLoader::new(config)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();

            match format {
                Format::Json => {
                    let records = loader.load().context("Outline load failed")?;
                    serde_json::to_writer_pretty(&mut out, &records)?;
                    writeln!(out)?;
                }
                Format::Jsonl => {
                    for record in loader.lazy_load() {
                        let record = record.context("Outline load failed")?;
                        serde_json::to_writer(&mut out, &record)?;
                        writeln!(out)?;
                    }
                }
            }
        }
        Commands::Collections => {
            let loader = OutlineLoader::new(config)?;
            let client = loader.client();
            let index = resolve_collections(client, &client.config().collection_ids)
                .context("Failed to resolve collections")?;

            println!("{:<38} {:<12} NAME", "ID", "PERMISSION");
            for collection in index.iter() {
                println!(
                    "{:<38} {:<12} {}",
                    collection.id,
                    collection.permission.as_deref().unwrap_or("-"),
                    collection.name
                );
            }
        }
    }

    Ok(())
}
