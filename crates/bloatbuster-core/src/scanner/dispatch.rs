/// Dispatch engine — feeds walked files through a bounded pool of probe
/// workers and into the aggregator.
///
/// # Pipeline
///
/// ```text
/// TreeWalker ──(filter: excluded ext)──▶ bounded job queue ──▶ N probe workers
///                                                                │
///                               Aggregator::observe ◀── Ok(size) ┤
///                               failures.push       ◀── Err(e)  ─┘
/// ```
///
/// The walk runs on the calling thread; workers are scoped threads, so every
/// worker has exited (and every queued job has been accounted for) before
/// [`DispatchEngine::run_with`] returns.
///
/// # Accounting
///
/// Every matched file becomes exactly one job, and every job ends in exactly
/// one of three buckets: observed, failed, or abandoned (cancellation).
///
/// # Cancellation
///
/// Once the cancel flag is set the walker stops submitting, probes already
/// running finish normally, and workers drain whatever is still queued
/// without touching the filesystem.
use crate::analysis::Aggregator;
use crate::config::RunConfig;
use crate::error::{DirectoryAccessError, ProbeError, ScanError};
use crate::model::size::{format_count, format_size};
use crate::model::{AggregateSnapshot, ExtensionKey, FileObservation};
use crate::scanner::probe::{MetadataProbe, SizeProbe};
use crate::scanner::progress::ScanProgress;
use crate::scanner::walker::{TreeWalker, WalkItem};
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Queue slots per worker. Caps memory held in submitted-but-unprobed paths
/// when the walker outruns the probes.
pub const JOBS_PER_WORKER: usize = 64;

/// Send a progress update every this many walked files.
const PROGRESS_INTERVAL: u64 = 1_000;

struct ProbeJob {
    path: PathBuf,
    extension: ExtensionKey,
}

/// A matched file whose size could not be read.
#[derive(Debug)]
pub struct ProbeFailure {
    pub path: PathBuf,
    pub error: ProbeError,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// The walk was drained and every probe resolved.
    Complete,
    /// Cancellation was requested; the aggregate is partial.
    Cancelled,
}

/// Counters describing a finished run.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub files_walked: u64,
    pub files_matched: u64,
    pub probes_succeeded: u64,
    /// Jobs drained from the queue without probing after cancellation.
    pub probes_abandoned: u64,
    pub duration: Duration,
}

/// Everything a run produces.
#[derive(Debug)]
pub struct ScanOutcome {
    pub snapshot: AggregateSnapshot,
    pub failures: Vec<ProbeFailure>,
    pub warnings: Vec<DirectoryAccessError>,
    pub status: ScanStatus,
    pub stats: ScanStats,
}

impl ScanOutcome {
    pub fn is_cancelled(&self) -> bool {
        self.status == ScanStatus::Cancelled
    }
}

#[derive(Default)]
struct ProbeTally {
    succeeded: AtomicU64,
    abandoned: AtomicU64,
}

/// Orchestrates one or more runs with a fixed config and probe.
pub struct DispatchEngine<P = MetadataProbe> {
    config: Arc<RunConfig>,
    probe: P,
}

impl DispatchEngine<MetadataProbe> {
    pub fn new(config: Arc<RunConfig>) -> Self {
        Self::with_probe(config, MetadataProbe)
    }
}

impl<P: SizeProbe> DispatchEngine<P> {
    /// Use a custom [`SizeProbe`] instead of filesystem metadata.
    pub fn with_probe(config: Arc<RunConfig>, probe: P) -> Self {
        Self { config, probe }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run to completion with a fresh aggregator and no cancellation.
    pub fn run(&self, root: &Path) -> Result<ScanOutcome, ScanError> {
        let aggregator = Aggregator::new();
        let cancel = AtomicBool::new(false);
        self.run_with(root, &aggregator, &cancel, None)
    }

    /// Run against a caller-owned aggregator and cancel flag.
    ///
    /// The only error is an unusable root, checked before any work starts.
    /// Everything that goes wrong after that lands in the outcome.
    pub fn run_with(
        &self,
        root: &Path,
        aggregator: &Aggregator,
        cancel: &AtomicBool,
        progress: Option<&Sender<ScanProgress>>,
    ) -> Result<ScanOutcome, ScanError> {
        validate_root(root)?;

        let start = Instant::now();
        let workers = self.config.workers.max(1);
        info!(
            "Starting scan of {} ({} excluded extensions, {} probe workers)",
            root.display(),
            self.config.excluded_extensions.len(),
            workers
        );

        let walker = TreeWalker::new(self.config.walk_threads, self.config.case_sensitivity);
        let (job_tx, job_rx) = crossbeam_channel::bounded::<ProbeJob>(workers * JOBS_PER_WORKER);
        let failures: Mutex<Vec<ProbeFailure>> = Mutex::new(Vec::new());
        let tally = ProbeTally::default();

        let mut warnings: Vec<DirectoryAccessError> = Vec::new();
        let mut files_walked: u64 = 0;
        let mut files_matched: u64 = 0;
        let mut interrupted = false;

        thread::scope(|scope| {
            for i in 0..workers {
                let jobs = job_rx.clone();
                let probe = &self.probe;
                let failures = &failures;
                let tally = &tally;
                thread::Builder::new()
                    .name(format!("bloatbuster-probe-{i}"))
                    .spawn_scoped(scope, move || {
                        probe_worker(probe, jobs, aggregator, failures, tally, cancel)
                    })
                    .expect("failed to spawn probe worker");
            }
            // Workers hold the only receivers now; when they all exit, `send`
            // fails instead of blocking forever.
            drop(job_rx);

            for item in walker.walk(root) {
                if cancel.load(Ordering::Relaxed) {
                    interrupted = true;
                    break;
                }

                let (path, extension) = match item {
                    WalkItem::File { path, extension } => (path, extension),
                    WalkItem::Warning(warning) => {
                        warn!("Skipping unreadable directory: {warning}");
                        warnings.push(warning);
                        continue;
                    }
                };

                files_walked += 1;
                if files_walked.is_multiple_of(PROGRESS_INTERVAL) {
                    if let Some(tx) = progress {
                        let _ = tx.try_send(ScanProgress::Update {
                            files_walked,
                            files_matched,
                            warnings: warnings.len() as u64,
                            current_path: path.to_string_lossy().into_owned(),
                        });
                    }
                }

                if !self.config.is_excluded(&extension) {
                    continue;
                }

                files_matched += 1;
                if job_tx.send(ProbeJob { path, extension }).is_err() {
                    // Unreachable unless every worker died; the scope join
                    // below re-raises the worker panic.
                    files_matched -= 1;
                    break;
                }
            }

            drop(job_tx);
        });

        let failures = failures.into_inner();
        let probes_succeeded = tally.succeeded.load(Ordering::Relaxed);
        let probes_abandoned = tally.abandoned.load(Ordering::Relaxed);
        debug_assert_eq!(
            files_matched,
            probes_succeeded + failures.len() as u64 + probes_abandoned,
            "every submitted probe must resolve exactly once"
        );

        let status = if interrupted || probes_abandoned > 0 {
            ScanStatus::Cancelled
        } else {
            ScanStatus::Complete
        };
        let snapshot = aggregator.snapshot();
        let stats = ScanStats {
            files_walked,
            files_matched,
            probes_succeeded,
            probes_abandoned,
            duration: start.elapsed(),
        };

        match status {
            ScanStatus::Complete => info!(
                "Scan complete: {} files walked, {} matched ({}), {} probe failures, {} warnings in {:?}",
                format_count(stats.files_walked),
                format_count(snapshot.total_files()),
                format_size(snapshot.total_size()),
                failures.len(),
                warnings.len(),
                stats.duration
            ),
            ScanStatus::Cancelled => info!(
                "Scan cancelled after {} files walked; {} probes abandoned",
                format_count(stats.files_walked),
                stats.probes_abandoned
            ),
        }

        Ok(ScanOutcome {
            snapshot,
            failures,
            warnings,
            status,
            stats,
        })
    }
}

/// Pull jobs until the queue is closed and drained.
fn probe_worker<P: SizeProbe>(
    probe: &P,
    jobs: Receiver<ProbeJob>,
    aggregator: &Aggregator,
    failures: &Mutex<Vec<ProbeFailure>>,
    tally: &ProbeTally,
    cancel: &AtomicBool,
) {
    for job in jobs.iter() {
        if cancel.load(Ordering::Relaxed) {
            tally.abandoned.fetch_add(1, Ordering::Relaxed);
            continue;
        }

        match probe.probe(&job.path) {
            Ok(size_bytes) => {
                aggregator.observe(FileObservation {
                    extension: job.extension,
                    size_bytes,
                    path: job.path,
                });
                tally.succeeded.fetch_add(1, Ordering::Relaxed);
            }
            Err(error) => {
                debug!("Probe failed for {}: {error}", job.path.display());
                failures.lock().push(ProbeFailure {
                    path: job.path,
                    error,
                });
            }
        }
    }
}

/// The root must exist and be a directory.
pub fn validate_root(root: &Path) -> Result<(), ScanError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory(root.to_path_buf())),
        Err(_) => Err(ScanError::RootNotFound(root.to_path_buf())),
    }
}
