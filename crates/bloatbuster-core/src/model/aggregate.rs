/// Per-file observations and the per-extension totals they fold into.
use crate::model::ExtensionKey;
use std::path::PathBuf;

/// One successfully probed file, on its way into the aggregator.
///
/// Created once per matched file and consumed by
/// [`Aggregator::observe`](crate::analysis::Aggregator::observe).
#[derive(Debug, Clone)]
pub struct FileObservation {
    pub extension: ExtensionKey,
    pub size_bytes: u64,
    /// Diagnostic only; never part of the aggregate.
    pub path: PathBuf,
}

/// Count and total size for one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateEntry {
    pub extension: ExtensionKey,
    pub file_count: u64,
    pub total_size_bytes: u64,
}

/// An immutable copy of the aggregator's state.
///
/// Entries are kept sorted by extension so two snapshots of the same data
/// compare equal regardless of the order observations arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateSnapshot {
    entries: Vec<AggregateEntry>,
}

impl AggregateSnapshot {
    pub fn new(mut entries: Vec<AggregateEntry>) -> Self {
        entries.sort_by(|a, b| a.extension.cmp(&b.extension));
        Self { entries }
    }

    /// Entries in extension order.
    pub fn entries(&self) -> &[AggregateEntry] {
        &self.entries
    }

    /// Entries by descending file count; ties fall back to extension order
    /// so the report is deterministic.
    pub fn by_count_desc(&self) -> Vec<&AggregateEntry> {
        let mut sorted: Vec<&AggregateEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.file_count
                .cmp(&a.file_count)
                .then_with(|| a.extension.cmp(&b.extension))
        });
        sorted
    }

    pub fn get(&self, extension: &str) -> Option<&AggregateEntry> {
        self.entries
            .iter()
            .find(|e| e.extension.as_str() == extension)
    }

    pub fn total_files(&self) -> u64 {
        self.entries.iter().map(|e| e.file_count).sum()
    }

    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.total_size_bytes).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CaseSensitivity;

    fn entry(ext: &str, count: u64, size: u64) -> AggregateEntry {
        AggregateEntry {
            extension: ExtensionKey::parse(ext, CaseSensitivity::Sensitive).unwrap(),
            file_count: count,
            total_size_bytes: size,
        }
    }

    #[test]
    fn totals_sum_all_entries() {
        let snap = AggregateSnapshot::new(vec![entry(".tmp", 3, 30), entry(".log", 2, 10)]);
        assert_eq!(snap.total_files(), 5);
        assert_eq!(snap.total_size(), 40);
        assert_eq!(snap.len(), 2);
    }

    #[test]
    fn construction_order_does_not_matter() {
        let a = AggregateSnapshot::new(vec![entry(".tmp", 1, 1), entry(".log", 1, 2)]);
        let b = AggregateSnapshot::new(vec![entry(".log", 1, 2), entry(".tmp", 1, 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn by_count_desc_breaks_ties_by_extension() {
        let snap = AggregateSnapshot::new(vec![
            entry(".b", 2, 0),
            entry(".a", 2, 0),
            entry(".c", 5, 0),
        ]);
        let order: Vec<&str> = snap
            .by_count_desc()
            .iter()
            .map(|e| e.extension.as_str())
            .collect();
        assert_eq!(order, vec![".c", ".a", ".b"]);
    }

    #[test]
    fn empty_snapshot() {
        let snap = AggregateSnapshot::default();
        assert!(snap.is_empty());
        assert_eq!(snap.total_files(), 0);
        assert!(snap.get(".tmp").is_none());
    }
}
