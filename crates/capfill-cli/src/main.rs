//! capfill CLI
//!
//! Fill a fixed-capacity destination with a random selection of files.

mod config;
mod history;
mod progress;
mod ui;

use capfill_core::{Event, SelectorConfig, select};
use capfill_engine::{BatchReport, TransferEngine, TransferOptions};
use capfill_scan::{FileFilter, scan};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::thread;

use config::Config;
use progress::{format_bytes, parse_size};

/// capfill - fill a destination with a random, size-bounded file selection
#[derive(Parser)]
#[command(name = "capfill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Byte budget, e.g. "15G", "1.5gb", "900K", or a bare byte count
    size: String,

    /// Source directory to scan
    source: PathBuf,

    /// Destination directory (created lazily on first write)
    dest: PathBuf,

    /// Comma-separated extensions to match, e.g. "mp3,ogg"
    #[arg(short, long)]
    pattern: Option<String>,

    /// Skip hash verification after each copy
    #[arg(long)]
    no_verify: bool,

    /// Skip live recordings ("live" in the file or parent directory name)
    #[arg(long)]
    no_live: bool,

    /// Drop files smaller than this size, e.g. "1M"
    #[arg(long)]
    min_size: Option<String>,

    /// Log events instead of rendering the progress display
    #[arg(long)]
    no_ui: bool,

    /// Seed the selection shuffle for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Override the selector's consecutive-miss limit
    #[arg(long)]
    miss_limit: Option<u32>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };
    config.validate()?;

    // In display mode log lines would fight the progress bars, so only
    // errors get through; headless mode logs at the configured level.
    let log_level = if !cli.no_ui {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level.as_str())
        .init();

    let capacity = parse_size(&cli.size)?;
    let min_size = match &cli.min_size {
        Some(s) => parse_size(s)?,
        None => config.scan.min_file_size,
    };
    let patterns: Vec<String> = match &cli.pattern {
        Some(p) => p.split(',').map(str::to_string).collect(),
        None => config.scan.patterns.clone(),
    };

    let filter = FileFilter::new(&patterns)
        .skip_live(cli.no_live || config.scan.skip_live)
        .min_size(min_size);
    let selector_config = SelectorConfig::new(capacity)
        .with_miss_limit(cli.miss_limit.unwrap_or(config.selection.miss_limit));
    let options = TransferOptions {
        verify: !cli.no_verify && config.transfer.verify,
    };

    tracing::info!(
        source = %cli.source.display(),
        dest = %cli.dest.display(),
        capacity = %format_bytes(capacity),
        patterns = ?patterns,
        verify = options.verify,
        "starting"
    );

    let (tx, rx) = capfill_core::channel(config.transfer.event_queue_depth);

    // The producer owns the whole blocking pipeline; the main thread only
    // consumes events. A dedicated RNG keeps the shuffle isolated so --seed
    // pins the selection exactly.
    let source = cli.source.clone();
    let dest = cli.dest.clone();
    let seed = cli.seed;
    let producer = thread::spawn(move || -> anyhow::Result<BatchReport> {
        let candidates = match scan(&source, &filter, &tx) {
            Ok(candidates) => candidates,
            Err(error) => {
                // The engine never ran, so close the stream ourselves.
                tx.emit(Event::BatchDone);
                return Err(error.into());
            }
        };

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let selection = select(candidates, &selector_config, &mut rng);

        let engine = TransferEngine::new(&dest, options);
        Ok(engine.run(&selection, &tx)?)
    });

    if cli.no_ui {
        ui::run_log(&rx);
    } else {
        ui::run_display(&rx, config.ui.history_lines);
    }

    let report = producer
        .join()
        .map_err(|_| anyhow::anyhow!("transfer thread panicked"))??;

    let copied: u64 = report
        .records
        .iter()
        .filter(|r| !r.status.is_failure())
        .map(|r| r.size)
        .sum();
    println!(
        "Copied {} of {} files ({})",
        report.records.iter().filter(|r| !r.status.is_failure()).count(),
        report.records.len(),
        format_bytes(copied)
    );

    if !report.is_clean() {
        for error in &report.errors {
            eprintln!("error: {error}");
        }
        anyhow::bail!("{} file(s) failed", report.errors.len());
    }

    Ok(())
}
