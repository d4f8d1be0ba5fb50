//! `auctionmatch`: compute the call-auction opening price of every
//! instrument in a CSV order file.
//!
//! ```text
//! auctionmatch orders.csv                 # results on stdout
//! auctionmatch orders.csv -o prices.csv   # results in a file (CRLF)
//! RUST_LOG=debug auctionmatch orders.csv -w 4
//! ```

mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use auctionmatch_fanout::AuctionPipeline;
use auctionmatch_types::AuctionConfig;

#[derive(Parser, Debug)]
#[command(name = "auctionmatch", version, about)]
struct Args {
    /// CSV order file: `instrumentID,direction,price,volume`, no header.
    input: PathBuf,

    /// Write results here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads for the pricing phase. Overrides the config file.
    #[arg(short, long)]
    workers: Option<usize>,

    /// JSON configuration (workers, default_tick, products).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_json);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Run failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn load_config(path: Option<&Path>) -> Result<AuctionConfig> {
    let Some(path) = path else {
        return Ok(AuctionConfig::cffex());
    };
    AuctionConfig::from_path(path)
        .with_context(|| format!("loading config {}", path.display()))
}

fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.workers.is_some() {
        config.workers = args.workers;
    }
    let pipeline = AuctionPipeline::from_config(&config).context("invalid configuration")?;

    let report = pipeline
        .run_path(&args.input)
        .with_context(|| format!("pricing {}", args.input.display()))?;

    match &args.output {
        Some(path) => output::write_file(path, &report.results)
            .with_context(|| format!("writing {}", path.display()))?,
        None => output::write_stdout(&report.results).context("writing stdout")?,
    }

    tracing::info!(
        instruments = report.results.len(),
        matched = report.matched(),
        rows_read = report.stats.rows_read,
        rows_rejected = report.stats.rows_rejected,
        workers = report.workers,
        result_root = %report.result_root,
        "Run summary"
    );
    Ok(())
}
