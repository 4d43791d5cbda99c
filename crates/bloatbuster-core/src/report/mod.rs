/// Report module — turns a finished snapshot into console text and files.
///
/// - [`render`] builds the human-readable summary table.
/// - [`record`] defines the structured record and writes it as JSON or CSV.
pub mod record;
pub mod render;

pub use record::{
    save, save_as, save_csv, write_json, ReportDetail, ReportFormat, ReportRecord,
};
pub use render::{failure_note, render, CANCELLED_NOTE};
