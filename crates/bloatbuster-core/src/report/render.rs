/// Console rendering of a finished run.
///
/// The layout is a fixed-width table (extension, file count, size in MiB)
/// sorted by descending file count, then totals, then the large / numerous
/// lists. An empty list is stated explicitly rather than omitted.
use crate::analysis::{classify, Classification};
use crate::config::RunConfig;
use crate::model::size::{format_mib, format_size};
use crate::model::{AggregateSnapshot, ExtensionKey};
use std::fmt;

const RULE_WIDTH: usize = 40;

/// Printed after the summary of a cancelled run.
pub const CANCELLED_NOTE: &str = "Scan cancelled; totals are partial.";

/// Render the summary for `snapshot` under `config`'s thresholds.
pub fn render(snapshot: &AggregateSnapshot, config: &RunConfig) -> String {
    Summary {
        snapshot,
        classification: classify(snapshot, config),
        large_label: format!("over {}", format_size(config.large_file_threshold)),
        many_label: format!("over {} files", config.many_files_threshold),
    }
    .to_string()
}

struct Summary<'a> {
    snapshot: &'a AggregateSnapshot,
    classification: Classification,
    large_label: String,
    many_label: String,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            snapshot,
            classification,
            large_label,
            many_label,
        } = self;

        writeln!(f, "Excludable files by extension:")?;
        writeln!(f, "{:<10} {:<15} {:<15}", "Extension", "Files", "Total size (MiB)")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for entry in snapshot.by_count_desc() {
            writeln!(
                f,
                "{:<10} {:<15} {}",
                display_extension(&entry.extension),
                entry.file_count,
                format_mib(entry.total_size_bytes)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Total excludable files: {}", snapshot.total_files())?;
        writeln!(
            f,
            "Total size of excludable files: {} MiB",
            format_mib(snapshot.total_size())
        )?;

        writeln!(f)?;
        writeln!(f, "Potentially expensive files to process:")?;
        if classification.large.is_empty() {
            writeln!(f, "No large extensions ({large_label}) identified.")?;
        } else {
            writeln!(
                f,
                "Large extensions ({large_label}): {}",
                join(&classification.large)
            )?;
        }
        if classification.numerous.is_empty() {
            writeln!(f, "No extensions with {many_label} identified.")
        } else {
            writeln!(
                f,
                "Numerous extensions ({many_label}): {}",
                join(&classification.numerous)
            )
        }
    }
}

/// One-line note for files left out of the totals, or `None` when nothing
/// was skipped.
pub fn failure_note(failed_probes: usize, unreadable_dirs: usize) -> Option<String> {
    if failed_probes == 0 && unreadable_dirs == 0 {
        return None;
    }
    let mut parts = Vec::with_capacity(2);
    if failed_probes > 0 {
        parts.push(format!(
            "{failed_probes} {} could not be probed",
            plural(failed_probes, "file", "files")
        ));
    }
    if unreadable_dirs > 0 {
        parts.push(format!(
            "{unreadable_dirs} {} could not be read",
            plural(unreadable_dirs, "directory", "directories")
        ));
    }
    Some(format!(
        "Note: {} and {} not included in the totals.",
        parts.join("; "),
        if failed_probes + unreadable_dirs == 1 { "is" } else { "are" }
    ))
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

fn display_extension(ext: &ExtensionKey) -> &str {
    if ext.is_empty() {
        "(none)"
    } else {
        ext.as_str()
    }
}

fn join(keys: &[ExtensionKey]) -> String {
    keys.iter()
        .map(display_extension)
        .collect::<Vec<_>>()
        .join(", ")
}
