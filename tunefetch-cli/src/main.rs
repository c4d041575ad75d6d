// ABOUTME: Command-line front end for tunefetch.
// ABOUTME: Resolves a catalog, tracklist, or single song and downloads the audio.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

use tunefetch::prelude::*;

/// Resolve song names to YouTube videos and download their audio.
#[derive(Parser, Debug)]
#[command(name = "tunefetch", version)]
struct Cli {
    #[command(flatten)]
    source: Source,

    /// Where to write the resolved catalog (defaults to the input catalog, or songs.json)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Download directory
    #[arg(long, short = 'd')]
    dir: Option<PathBuf>,

    /// Maximum concurrent searches
    #[arg(long, short = 't')]
    threads: Option<NonZeroUsize>,

    /// Minimum milliseconds between searches
    #[arg(long)]
    min_interval_ms: Option<u64>,

    /// Resolve and save the catalog without downloading
    #[arg(long)]
    resolve_only: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// JSON catalog to resolve and download
    #[arg(long, short = 'c')]
    catalog: Option<PathBuf>,

    /// Tracklist text file, one song per line
    #[arg(long, short = 'p')]
    playlist: Option<PathBuf>,

    /// A single song name or YouTube URL
    #[arg(long, short = 's')]
    song: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,tunefetch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(summary) => {
            print_summary(&summary);
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunSummary> {
    let mut config = PipelineConfig::from_env().context("invalid environment configuration")?;
    if let Some(dir) = cli.dir {
        config = config.download_dir(dir);
    }
    if let Some(threads) = cli.threads {
        config = config.concurrency(threads);
    }
    if let Some(ms) = cli.min_interval_ms {
        config = config.min_interval(Duration::from_millis(ms));
    }

    let pipeline = Pipeline::from_config(config)?.resolve_only(cli.resolve_only);

    let summary = match (cli.source.catalog, cli.source.playlist, cli.source.song) {
        (Some(catalog), _, _) => {
            let output = cli.output.unwrap_or_else(|| catalog.clone());
            println!("Processing catalog: {}", catalog.display());
            pipeline.run_catalog(&catalog, &output).await?
        }
        (_, Some(playlist), _) => {
            let output = cli.output.unwrap_or_else(|| PathBuf::from("songs.json"));
            println!("Processing playlist: {}", playlist.display());
            pipeline.run_playlist(&playlist, &output).await?
        }
        (_, _, Some(song)) => {
            println!("Processing single song: {}", song);
            pipeline.run_single(&song).await?
        }
        (None, None, None) => anyhow::bail!("one of --catalog, --playlist, or --song is required"),
    };
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!("\nSummary: {}", summary);

    if !summary.failed_to_resolve.is_empty() {
        println!("\nNot found:");
        for name in &summary.failed_to_resolve {
            println!("- {}", name);
        }
    }

    let failures: Vec<_> = summary.fetch.failures().collect();
    if !failures.is_empty() {
        println!("\nDownload failures:");
        for (name, message) in failures {
            println!("- {}: {}", name, message);
        }
    }
}
