/// Structured report record and its JSON / CSV persistence.
///
/// JSON layout:
///
/// ```json
/// {
///   "generated_at": "2026-01-01T12:00:00+01:00",
///   "total_files": 5,
///   "total_size": 40000000,
///   "partial": false,
///   "details": [
///     { "extension": ".tmp", "file_count": 3, "total_size": 30000000 }
///   ]
/// }
/// ```
///
/// `details` follows the console table order (descending file count).
/// `partial` is set when the run was cancelled before every file was probed.
///
/// Both formats are encoded in memory and written with a single `fs::write`,
/// so every I/O failure surfaces as [`PersistenceError::Io`] with the path.
use crate::error::PersistenceError;
use crate::model::AggregateSnapshot;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Json,
    /// Per-extension rows only; totals are left to the spreadsheet.
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDetail {
    pub extension: String,
    pub file_count: u64,
    pub total_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub generated_at: DateTime<Local>,
    pub total_files: u64,
    pub total_size: u64,
    #[serde(default)]
    pub partial: bool,
    pub details: Vec<ReportDetail>,
}

impl ReportRecord {
    pub fn from_snapshot(snapshot: &AggregateSnapshot) -> Self {
        Self {
            generated_at: Local::now(),
            total_files: snapshot.total_files(),
            total_size: snapshot.total_size(),
            partial: false,
            details: details(snapshot),
        }
    }

    /// Flag the record as coming from a cancelled run.
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }
}

fn details(snapshot: &AggregateSnapshot) -> Vec<ReportDetail> {
    snapshot
        .by_count_desc()
        .into_iter()
        .map(|e| ReportDetail {
            extension: e.extension.to_string(),
            file_count: e.file_count,
            total_size: e.total_size_bytes,
        })
        .collect()
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    std::fs::write(path, bytes).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the JSON record for `snapshot` to `path` and return it.
pub fn save(snapshot: &AggregateSnapshot, path: &Path) -> Result<ReportRecord, PersistenceError> {
    let record = ReportRecord::from_snapshot(snapshot);
    write_json(&record, path)?;
    Ok(record)
}

/// Write an already-built record as pretty JSON.
pub fn write_json(record: &ReportRecord, path: &Path) -> Result<(), PersistenceError> {
    let mut bytes = serde_json::to_vec_pretty(record)?;
    bytes.push(b'\n');
    write_file(path, &bytes)
}

/// Write one `extension,file_count,total_size` row per extension.
pub fn save_csv(snapshot: &AggregateSnapshot, path: &Path) -> Result<(), PersistenceError> {
    let mut bytes = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut bytes);
        for detail in details(snapshot) {
            writer.serialize(detail)?;
        }
        writer.flush().map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    write_file(path, &bytes)
}

/// Dispatch on `format`. `partial` marks the JSON record of a cancelled run;
/// CSV rows carry no run-level fields.
pub fn save_as(
    snapshot: &AggregateSnapshot,
    path: &Path,
    format: ReportFormat,
    partial: bool,
) -> Result<(), PersistenceError> {
    match format {
        ReportFormat::Json => {
            write_json(&ReportRecord::from_snapshot(snapshot).partial(partial), path)
        }
        ReportFormat::Csv => save_csv(snapshot, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AggregateEntry, CaseSensitivity, ExtensionKey};

    fn sample() -> AggregateSnapshot {
        let mk = |ext: &str, count, size| AggregateEntry {
            extension: ExtensionKey::parse(ext, CaseSensitivity::Sensitive).unwrap(),
            file_count: count,
            total_size_bytes: size,
        };
        AggregateSnapshot::new(vec![mk(".tmp", 3, 30_000_000), mk(".log", 2, 10_000_000)])
    }

    #[test]
    fn json_record_contents() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("exclude_files_report.json");
        save(&sample(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["total_files"], 5);
        assert_eq!(value["total_size"], 40_000_000);
        assert_eq!(
            value["details"],
            serde_json::json!([
                { "extension": ".tmp", "file_count": 3, "total_size": 30_000_000 },
                { "extension": ".log", "file_count": 2, "total_size": 10_000_000 },
            ])
        );
        assert!(value["generated_at"].is_string());
        assert_eq!(value["partial"], false);
    }

    #[test]
    fn cancelled_run_is_marked_partial() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("r.json");
        save_as(&sample(), &path, ReportFormat::Json, true).unwrap();

        let read: ReportRecord =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(read.partial);
        assert_eq!(read.total_files, 5);
    }

    #[test]
    fn record_without_partial_field_reads_as_complete() {
        let text = r#"{"generated_at":"2026-01-01T12:00:00+01:00","total_files":0,"total_size":0,"details":[]}"#;
        let read: ReportRecord = serde_json::from_str(text).unwrap();
        assert!(!read.partial);
    }

    #[test]
    fn json_record_round_trips_through_serde() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("r.json");
        let written = save(&sample(), &path).unwrap();
        let read: ReportRecord =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read.details, written.details);
        assert_eq!(read.total_files, 5);
    }

    #[test]
    fn csv_has_header_and_rows() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("r.csv");
        save_as(&sample(), &path, ReportFormat::Csv, false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "extension,file_count,total_size",
                ".tmp,3,30000000",
                ".log,2,10000000"
            ]
        );
    }

    #[test]
    fn unwritable_path_is_io_error_naming_the_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("no_such_dir").join("r.json");
        for format in [ReportFormat::Json, ReportFormat::Csv] {
            match save_as(&sample(), &path, format, false).unwrap_err() {
                PersistenceError::Io { path: failed, .. } => assert_eq!(failed, path),
                other => panic!("{format:?}: expected Io error, got {other:?}"),
            }
        }
        let err = save(&sample(), &path).unwrap_err();
        assert!(err.to_string().contains("no_such_dir"), "{err}");
    }
}
