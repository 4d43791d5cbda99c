/// Scan progress reporting — lightweight messages sent from the scan
/// thread to whoever is watching via a crossbeam channel.
///
/// Progress is advisory: messages are sent with `try_send` and dropped when
/// the channel is full, so a slow or absent reader never stalls the walk.
/// The authoritative result is the [`ScanOutcome`](super::ScanOutcome).

/// Periodic running totals.
#[derive(Debug, Clone)]
pub enum ScanProgress {
    Update {
        /// Regular files enumerated so far.
        files_walked: u64,
        /// Files whose extension is excluded and were queued for probing.
        files_matched: u64,
        /// Traversal warnings so far.
        warnings: u64,
        current_path: String,
    },
}
