/// Data model for Bloatbuster runs.
///
/// Re-exports the extension key, per-file observations, and the
/// aggregate entry / snapshot types shared by the scanner and reports.
pub mod aggregate;
pub mod extension;
pub mod size;

pub use aggregate::{AggregateEntry, AggregateSnapshot, FileObservation};
pub use extension::{CaseSensitivity, ExtensionKey};
