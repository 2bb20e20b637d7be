//! Deadline Sync - Main Entry Point
//!
//! Run without arguments from the site root to refresh `data/deadlines.json`
//! from the published spreadsheet. The implementation is in the
//! `deadline_sync` library.

use anyhow::Result;
use clap::Parser;
use deadline_sync::storage::to_json;
use deadline_sync::{
    DEFAULT_OUTPUT_PATH, DEFAULT_SOURCE_URL, DeadlineSync, FileSource, HttpSource, TableSource,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Deadline Sync - spreadsheet CSV export to deadlines JSON for the static site
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the CSV export to fetch
    #[arg(long, default_value = DEFAULT_SOURCE_URL, conflicts_with = "input")]
    url: String,

    /// Read a local CSV export instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where to write the JSON list
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Print the JSON to stdout instead of writing the output file
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn execute<S: TableSource>(sync: DeadlineSync<S>, dry_run: bool) -> Result<()> {
    if dry_run {
        let records = sync.prepare()?;
        println!("{}", to_json(&records)?);
    } else {
        sync.run()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.input {
        Some(path) => execute(DeadlineSync::new(FileSource::new(path), &args.output), args.dry_run),
        None => execute(DeadlineSync::new(HttpSource::new(args.url), &args.output), args.dry_run),
    }
}
