/// Concurrent per-extension aggregation.
///
/// # Locking
///
/// The map is an `RwLock<HashMap<ExtensionKey, Mutex<Counts>>>`. Observing an
/// extension that is already present takes only the shared map lock plus that
/// extension's mutex, so workers hitting different extensions never contend.
/// The exclusive map lock is taken once per distinct extension, to insert it.
///
/// Count and size live under the same mutex, so a snapshot can never see a
/// count that has been bumped without its size (no torn entries).
use crate::model::{AggregateEntry, AggregateSnapshot, ExtensionKey, FileObservation};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    files: u64,
    bytes: u64,
}

impl Counts {
    #[inline]
    fn add(&mut self, size: u64) {
        self.files += 1;
        self.bytes += size;
    }
}

/// Running totals for one run. Create one per run and pass it explicitly.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: RwLock<HashMap<ExtensionKey, Mutex<Counts>>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation into its extension's totals. Safe to call from
    /// any number of threads at once.
    pub fn observe(&self, observation: FileObservation) {
        trace!(
            "{} +{} B ({})",
            observation.extension,
            observation.size_bytes,
            observation.path.display()
        );

        {
            let map = self.entries.read();
            if let Some(counts) = map.get(&observation.extension) {
                counts.lock().add(observation.size_bytes);
                return;
            }
        }

        // First sighting of this extension (or a race with another first
        // sighting); `entry` resolves the race under the write lock.
        let mut map = self.entries.write();
        map.entry(observation.extension)
            .or_default()
            .get_mut()
            .add(observation.size_bytes);
    }

    /// Copy the current totals. May run concurrently with `observe`; each
    /// entry reflects some prefix of the observations for its extension.
    pub fn snapshot(&self) -> AggregateSnapshot {
        let map = self.entries.read();
        let entries = map
            .iter()
            .map(|(extension, counts)| {
                let counts = *counts.lock();
                AggregateEntry {
                    extension: extension.clone(),
                    file_count: counts.files,
                    total_size_bytes: counts.bytes,
                }
            })
            .collect();
        AggregateSnapshot::new(entries)
    }

    /// Number of distinct extensions seen so far.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
