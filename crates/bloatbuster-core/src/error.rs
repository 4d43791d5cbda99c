/// Error kinds for a Bloatbuster run.
///
/// Only [`ConfigError`] and [`ScanError`] abort a run, and both are raised
/// before traversal starts. Directory and probe errors are collected into the
/// outcome; persistence errors affect the save step only.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The configuration file is missing, unreadable, or invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The scan root cannot be used.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("root directory does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// A single file's size could not be obtained.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The file vanished between enumeration and probing.
    #[error("file not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Io(err),
        }
    }
}

/// A directory could not be read during traversal. Non-fatal.
#[derive(Debug, Clone, Error)]
#[error("cannot read {}: {message}", path_label(.path))]
pub struct DirectoryAccessError {
    /// `None` when the walker could not attribute the error to a path.
    pub path: Option<PathBuf>,
    pub message: String,
}

fn path_label(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown path>".to_string())
}

/// The report could not be written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot encode JSON report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write CSV report: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_error_classifies_io_kinds() {
        let nf = ProbeError::from(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(nf, ProbeError::NotFound));
        let pd = ProbeError::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(pd, ProbeError::PermissionDenied));
        let other = ProbeError::from(io::Error::other("disk on fire"));
        assert!(matches!(other, ProbeError::Io(_)));
    }

    #[test]
    fn directory_error_display_without_path() {
        let err = DirectoryAccessError {
            path: None,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "cannot read <unknown path>: boom");
    }
}
