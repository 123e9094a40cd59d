use std::time::SystemTime;

use chrono::{DateTime, Local};

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable byte count using 1024-based units, e.g. `1.5 MB`.
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", SIZE_UNITS[unit])
}

/// Local time as `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M").to_string()
}
