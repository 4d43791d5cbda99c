/// Size probe — the single filesystem query made per matched file.
use crate::error::ProbeError;
use std::path::Path;

/// Returns the byte size of the file at `path`.
///
/// Implementations are shared by reference across all probe workers, so they
/// must be `Sync` and must not hold per-call state.
pub trait SizeProbe: Sync {
    fn probe(&self, path: &Path) -> Result<u64, ProbeError>;
}

/// Probe backed by `symlink_metadata`, the same stat call the walker's
/// classification is based on, so a symlink swapped in after enumeration is
/// measured as the link itself rather than its target.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataProbe;

impl SizeProbe for MetadataProbe {
    fn probe(&self, path: &Path) -> Result<u64, ProbeError> {
        let meta = std::fs::symlink_metadata(path)?;
        Ok(meta.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn probe_reports_byte_length() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("testfile.tmp");
        fs::write(&path, "test").unwrap();
        assert_eq!(MetadataProbe.probe(&path).unwrap(), 4);
    }

    #[test]
    fn probe_empty_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("empty.log");
        fs::write(&path, "").unwrap();
        assert_eq!(MetadataProbe.probe(&path).unwrap(), 0);
    }

    #[test]
    fn probe_missing_file_is_not_found() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = MetadataProbe.probe(&tmp.path().join("gone.tmp")).unwrap_err();
        assert!(matches!(err, ProbeError::NotFound));
    }
}
