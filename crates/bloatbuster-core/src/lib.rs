/// Bloatbuster Core — walking, probing, and per-extension aggregation.
///
/// This crate contains all business logic with zero CLI dependencies.
/// The binary at the workspace root only parses arguments, installs the
/// logging subscriber, and prints what this crate produces.
///
/// # Modules
///
/// - [`model`] — Extension keys, observations, aggregate entries, size units.
/// - [`config`] — The immutable `RunConfig` and its TOML loader.
/// - [`error`] — Fatal and non-fatal error kinds.
/// - [`scanner`] — Tree walker, size probe, and the bounded dispatch engine.
/// - [`analysis`] — The concurrent aggregator and threshold classification.
/// - [`report`] — Text rendering and JSON / CSV persistence.
pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod scanner;

pub use analysis::{classify, Aggregator, Classification};
pub use config::RunConfig;
pub use error::{ConfigError, DirectoryAccessError, PersistenceError, ProbeError, ScanError};
pub use model::{AggregateEntry, AggregateSnapshot, CaseSensitivity, ExtensionKey, FileObservation};
pub use scanner::{run, start_scan, DispatchEngine, ScanHandle, ScanOutcome, ScanStatus};
