//! Goodreads-Meta main entry point
//!
//! This is the command-line interface for looking up book metadata on Goodreads.

use anyhow::Context;
use clap::Parser;
use goodreads_meta::config::{load_config, Config};
use goodreads_meta::{GoodreadsProvider, MetadataProvider, MetadataRecord, SearchOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Goodreads-Meta: book metadata lookup
///
/// Searches Goodreads for the given query, fetches every matching book page
/// and prints the extracted metadata.
#[derive(Parser, Debug)]
#[command(name = "goodreads-meta")]
#[command(version = "1.0.0")]
#[command(about = "Look up book metadata on Goodreads", long_about = None)]
struct Cli {
    /// Search text (title, author, or both)
    #[arg(value_name = "QUERY", required = true)]
    query: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print records as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    let provider =
        GoodreadsProvider::new(&config.provider).context("failed to create Goodreads provider")?;

    let query = cli.query.join(" ");
    tracing::info!("Searching {} for '{}'", provider.name(), query);

    let records = provider.search(&query, &SearchOptions::default()).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_records(&records);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("goodreads_meta=info,warn"),
            1 => EnvFilter::new("goodreads_meta=debug,info"),
            2 => EnvFilter::new("goodreads_meta=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints a short human-readable listing of the records
fn print_records(records: &[MetadataRecord]) {
    if records.is_empty() {
        println!("No books found");
        return;
    }

    for (index, record) in records.iter().enumerate() {
        println!("{}. {}", index + 1, record.title);
        if !record.authors.is_empty() {
            println!("   Authors:   {}", record.authors.join(", "));
        }
        if let Some(series) = &record.series {
            match record.series_index {
                Some(series_index) => println!("   Series:    {} #{}", series, series_index),
                None => println!("   Series:    {}", series),
            }
        }
        if let Some(publisher) = &record.publisher {
            println!("   Publisher: {}", publisher);
        }
        if let Some(date) = &record.published_date {
            println!("   Published: {}", date.format("%Y-%m-%d"));
        }
        if let Some(rating) = record.rating {
            println!("   Rating:    {:.2}", rating);
        }
        println!("   URL:       {}", record.url);
    }
}
