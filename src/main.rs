//! Bloatbuster — finds which excludable file types are bloating a tree.
//!
//! Thin binary entry point. All logic lives in `bloatbuster-core`; this file
//! parses arguments, installs logging, and prints what the core produces.

mod progress;

use anyhow::Context;
use bloatbuster_core::model::size::format_count;
use bloatbuster_core::report::{self, ReportFormat};
use bloatbuster_core::scanner::progress::ScanProgress;
use bloatbuster_core::{start_scan, RunConfig};
use clap::{Parser, ValueEnum};
use crossbeam_channel::RecvTimeoutError;
use progress::ProgressReporter;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Report file format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum FormatArg {
    /// Totals plus per-extension details
    #[default]
    Json,
    /// One row per extension
    Csv,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Csv => ReportFormat::Csv,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bloatbuster")]
#[command(about = "Summarise excludable files by extension and flag the expensive ones")]
#[command(version)]
struct Args {
    /// Root directory to scan
    root: PathBuf,

    /// Path to the TOML config file
    #[arg(short, long, default_value = "bloatbuster.toml")]
    config: PathBuf,

    /// Where to write the report
    #[arg(short, long, default_value = "exclude_files_report.json")]
    output: PathBuf,

    /// Report file format
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Override the number of size-probe workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Append log output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Do not show the progress spinner
    #[arg(long)]
    no_progress: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.log_file.as_deref())?;

    tracing::info!("Bloatbuster starting");

    let mut config = RunConfig::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    if let Some(workers) = args.workers {
        config.set_workers(workers)?;
    }
    let config = Arc::new(config);

    let handle = start_scan(args.root.clone(), Arc::clone(&config))
        .with_context(|| format!("cannot scan {}", args.root.display()))?;

    let cancel_flag = handle.cancel_flag();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping scan...");
        cancel_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to set signal handler")?;

    let reporter = if args.no_progress {
        ProgressReporter::hidden()
    } else {
        ProgressReporter::new()
    };

    // The scan thread owns the only sender, so the channel disconnects when
    // the scan ends.
    loop {
        match handle.progress_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(update) => {
                reporter.update(&update);
                let ScanProgress::Update {
                    files_walked,
                    files_matched,
                    warnings,
                    current_path,
                } = update;
                tracing::debug!(
                    "{} files walked, {} matched, {} warnings (at {})",
                    format_count(files_walked),
                    format_count(files_matched),
                    warnings,
                    current_path
                );
            }
            Err(RecvTimeoutError::Timeout) => {
                if handle.is_cancelled() {
                    reporter.set_status("Cancelling...");
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    let outcome = handle.wait()?;
    reporter.finish_and_clear();

    print!("{}", report::render(&outcome.snapshot, &config));

    for failure in &outcome.failures {
        tracing::warn!("Could not probe {failure}");
    }
    if let Some(note) = report::failure_note(outcome.failures.len(), outcome.warnings.len()) {
        println!("\n{note}");
    }
    let partial = outcome.is_cancelled();
    if partial {
        tracing::warn!("{}", report::CANCELLED_NOTE);
        println!("\n{}", report::CANCELLED_NOTE);
    }

    // A failed save leaves the printed summary valid; report it and carry on.
    match report::save_as(&outcome.snapshot, &args.output, args.format.into(), partial) {
        Ok(()) => println!("\nReport saved to {}", args.output.display()),
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("\nReport could not be saved: {err}");
        }
    }

    tracing::info!("Bloatbuster finished");
    Ok(())
}

/// Install the process-wide `fmt` subscriber, writing to stderr or appending
/// to `log_file`.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
