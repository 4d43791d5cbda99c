/// Scanner module — walks the tree and probes matched files.
///
/// - [`walker`] enumerates regular files with `jwalk` (symlinks not followed).
/// - [`probe`] measures one file.
/// - [`dispatch`] connects the two through a bounded worker pool and folds
///   results into an [`Aggregator`].
///
/// [`run`] scans synchronously. [`start_scan`] scans on a background thread
/// and hands back a [`ScanHandle`] for progress, live snapshots, and
/// cancellation.
pub mod dispatch;
pub mod probe;
pub mod progress;
pub mod walker;

pub use dispatch::{
    validate_root, DispatchEngine, ProbeFailure, ScanOutcome, ScanStats, ScanStatus,
};
pub use probe::{MetadataProbe, SizeProbe};
pub use walker::{TreeWalker, WalkItem};

use crate::analysis::Aggregator;
use crate::config::RunConfig;
use crate::error::ScanError;
use crossbeam_channel::Receiver;
use progress::ScanProgress;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Maximum number of progress messages that may queue up in the channel.
///
/// Progress is sent with `try_send`, so a full channel drops updates rather
/// than stalling the walk.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 1_024;

/// Handle to a running or completed background scan.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Aggregator being filled by the scan; snapshot it for live totals.
    aggregator: Arc<Aggregator>,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    thread: thread::JoinHandle<Result<ScanOutcome, ScanError>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible. In-flight probes finish;
    /// queued ones are abandoned.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Shared cancel flag, for callers that must cancel from elsewhere (a
    /// signal handler, for one).
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// The live aggregator. Snapshots taken before [`wait`](Self::wait)
    /// returns may be partial.
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the scan thread exits and return its outcome.
    pub fn wait(self) -> Result<ScanOutcome, ScanError> {
        match self.thread.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Start a scan of `root` on a background thread.
///
/// The root is validated before the thread starts, so a missing or non-
/// directory root is reported here rather than from [`ScanHandle::wait`].
pub fn start_scan(root: PathBuf, config: Arc<RunConfig>) -> Result<ScanHandle, ScanError> {
    validate_root(&root)?;

    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = Arc::clone(&cancel_flag);
    let aggregator = Arc::new(Aggregator::new());
    let aggregator_clone = Arc::clone(&aggregator);

    let thread = thread::Builder::new()
        .name("bloatbuster-scanner".into())
        .spawn(move || {
            info!("Scanner thread started for {}", root.display());
            let engine = DispatchEngine::new(config);
            engine.run_with(&root, &aggregator_clone, &cancel_clone, Some(&progress_tx))
        })
        .expect("failed to spawn scanner thread");

    Ok(ScanHandle {
        progress_rx,
        aggregator,
        cancel_flag,
        thread,
    })
}

/// Scan `root` on the calling thread and return the finished outcome.
pub fn run(root: &Path, config: Arc<RunConfig>) -> Result<ScanOutcome, ScanError> {
    DispatchEngine::new(config).run(root)
}
