//! Live progress display for a running scan.
//!
//! A spinner on stderr, refreshed from the core's `ScanProgress` messages.
//! indicatif draws nothing when stderr is not a terminal, so piped and
//! captured runs see only the summary.

use bloatbuster_core::model::size::format_count;
use bloatbuster_core::scanner::progress::ScanProgress;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message("Scanning...");
        Self { bar }
    }

    /// A reporter that never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn update(&self, progress: &ScanProgress) {
        self.bar.set_message(message(progress));
    }

    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

fn message(progress: &ScanProgress) -> String {
    let ScanProgress::Update {
        files_walked,
        files_matched,
        warnings,
        ..
    } = progress;
    format!(
        "Files: {} | Matched: {} | Warnings: {}",
        format_count(*files_walked),
        format_count(*files_matched),
        warnings
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_shows_walk_counters() {
        let update = ScanProgress::Update {
            files_walked: 12_345,
            files_matched: 1_000,
            warnings: 2,
            current_path: "/tmp/x.tmp".into(),
        };
        assert_eq!(
            message(&update),
            "Files: 12,345 | Matched: 1,000 | Warnings: 2"
        );
    }

    #[test]
    fn hidden_reporter_accepts_updates() {
        let reporter = ProgressReporter::hidden();
        reporter.update(&ScanProgress::Update {
            files_walked: 1,
            files_matched: 0,
            warnings: 0,
            current_path: String::new(),
        });
        reporter.finish_and_clear();
    }
}
