//! Human-readable byte counts.
//!
//! Decimal thresholds (1 KB = 1000 B) with one digit after the point and no
//! space before the unit, e.g. `999.0B`, `1.0KB`, `12.3MB`.

const KB: u64 = 1_000;
const MB: u64 = 1_000_000;
const GB: u64 = 1_000_000_000;

/// Format a byte count with the largest unit it reaches.
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{:.1}B", bytes as f64)
    } else if bytes < MB {
        format!("{:.1}KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1}GB", bytes as f64 / GB as f64)
    }
}
