/// Run configuration — loaded once at startup, immutable for the run.
///
/// The on-disk format is TOML:
///
/// ```toml
/// exclude_extensions = [".tmp", ".log", "bak"]
/// large_file_threshold = 52428800   # bytes, default 50 MiB
/// many_files_threshold = 100        # files, default 100
/// case_sensitive = true             # default true
/// workers = 8                       # probe threads, default = CPU count
/// walk_threads = 4                  # directory-read threads, default = CPU count
/// ```
///
/// Every field is optional; an empty file is a valid config that excludes
/// nothing. A missing or unparsable file is a [`ConfigError`].
use crate::error::ConfigError;
use crate::model::{CaseSensitivity, ExtensionKey};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 52_428_800;
pub const DEFAULT_MANY_FILES_THRESHOLD: u64 = 100;

/// Settings shared read-only by the walker, the dispatch engine, and the
/// report renderer.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub excluded_extensions: HashSet<ExtensionKey>,
    /// An extension is "large" when its total size is strictly above this.
    pub large_file_threshold: u64,
    /// An extension is "numerous" when its file count is strictly above this.
    pub many_files_threshold: u64,
    pub case_sensitivity: CaseSensitivity,
    /// Size-probe worker threads. Always at least 1.
    pub workers: usize,
    /// Directory-read threads used by the walker. Always at least 1.
    pub walk_threads: usize,
}

/// The file as written by the user, before normalisation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    exclude_extensions: Vec<String>,
    #[serde(default = "default_large_file_threshold")]
    large_file_threshold: u64,
    #[serde(default = "default_many_files_threshold")]
    many_files_threshold: u64,
    #[serde(default = "default_case_sensitive")]
    case_sensitive: bool,
    workers: Option<usize>,
    walk_threads: Option<usize>,
}

fn default_large_file_threshold() -> u64 {
    DEFAULT_LARGE_FILE_THRESHOLD
}

fn default_many_files_threshold() -> u64 {
    DEFAULT_MANY_FILES_THRESHOLD
}

fn default_case_sensitive() -> bool {
    true
}

/// Worker count proportional to available parallelism.
pub fn default_workers() -> usize {
    num_cpus::get().max(1)
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            excluded_extensions: HashSet::new(),
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
            many_files_threshold: DEFAULT_MANY_FILES_THRESHOLD,
            case_sensitivity: CaseSensitivity::Sensitive,
            workers: default_workers(),
            walk_threads: default_workers(),
        }
    }
}

impl RunConfig {
    /// Load and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_raw(raw)
    }

    /// Parse a config from TOML text (no file involved).
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// A default config excluding `extensions` (case-sensitive).
    pub fn with_extensions<I, S>(extensions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let case = CaseSensitivity::Sensitive;
        Ok(Self {
            excluded_extensions: normalise_extensions(extensions, case)?,
            ..Self::default()
        })
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let case = CaseSensitivity::from_flag(raw.case_sensitive);
        Ok(Self {
            excluded_extensions: normalise_extensions(&raw.exclude_extensions, case)?,
            large_file_threshold: raw.large_file_threshold,
            many_files_threshold: raw.many_files_threshold,
            case_sensitivity: case,
            workers: positive("workers", raw.workers)?.unwrap_or_else(default_workers),
            walk_threads: positive("walk_threads", raw.walk_threads)?
                .unwrap_or_else(default_workers),
        })
    }

    /// Override the probe worker count. Zero is rejected.
    pub fn set_workers(&mut self, workers: usize) -> Result<(), ConfigError> {
        if let Some(n) = positive("workers", Some(workers))? {
            self.workers = n;
        }
        Ok(())
    }

    pub fn is_excluded(&self, extension: &ExtensionKey) -> bool {
        self.excluded_extensions.contains(extension)
    }
}

fn normalise_extensions<I, S>(
    raw: I,
    case: CaseSensitivity,
) -> Result<HashSet<ExtensionKey>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|s| {
            ExtensionKey::parse(s.as_ref(), case)
                .ok_or_else(|| ConfigError::Invalid("exclude_extensions contains a blank entry".into()))
        })
        .collect()
}

fn positive(field: &str, value: Option<usize>) -> Result<Option<usize>, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::Invalid(format!("{field} must be at least 1"))),
        other => Ok(other),
    }
}
