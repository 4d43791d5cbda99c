/// Size formatting utilities for reports and log lines.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;

/// Byte count as mebibytes with two decimals, as the report table shows it.
pub fn format_mib(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / MIB)
}

/// Byte count in the largest binary unit that keeps the value above one.
pub fn format_size(bytes: u64) -> String {
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < MIB {
        format!("{:.1} KiB", b / KIB)
    } else if b < GIB {
        format!("{:.1} MiB", b / MIB)
    } else if b < TIB {
        format!("{:.2} GiB", b / GIB)
    } else {
        format!("{:.2} TiB", b / TIB)
    }
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mib_has_two_decimals() {
        assert_eq!(format_mib(0), "0.00");
        assert_eq!(format_mib(1_048_576), "1.00");
        assert_eq!(format_mib(30_000_000), "28.61");
    }

    #[test]
    fn size_picks_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(52_428_800), "50.0 MiB");
        assert_eq!(format_size(1_073_741_824), "1.00 GiB");
    }

    #[test]
    fn count_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
