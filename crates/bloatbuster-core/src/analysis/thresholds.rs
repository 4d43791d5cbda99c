/// Threshold classification — which extensions are disproportionately
/// large or numerous.
use crate::config::RunConfig;
use crate::model::{AggregateSnapshot, ExtensionKey};

/// Flagged extensions, each list in report order (descending file count).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// `total_size_bytes > large_file_threshold`.
    pub large: Vec<ExtensionKey>,
    /// `file_count > many_files_threshold`.
    pub numerous: Vec<ExtensionKey>,
}

/// Classify the final snapshot. Both comparisons are strict: sitting exactly
/// on a threshold does not flag an extension.
pub fn classify(snapshot: &AggregateSnapshot, config: &RunConfig) -> Classification {
    let mut result = Classification::default();
    for entry in snapshot.by_count_desc() {
        if entry.total_size_bytes > config.large_file_threshold {
            result.large.push(entry.extension.clone());
        }
        if entry.file_count > config.many_files_threshold {
            result.numerous.push(entry.extension.clone());
        }
    }
    result
}
