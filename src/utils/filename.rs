use crate::utils::constants::{DEFAULT_OUTPUT_DIR, STATION_TABLE_EXTENSION};
use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Path of a station's source table: `{data_dir}/{code}.csv`
pub fn station_table_path(data_dir: &Path, code: &str) -> PathBuf {
    data_dir.join(format!("{}.{}", code, STATION_TABLE_EXTENSION))
}

/// Generate default briefing directory with format: output/briefings-{YYMMDD}
pub fn generate_default_briefing_dir() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let dirname = format!("briefings-{:02}{:02}{:02}", year, month, day);
    PathBuf::from(DEFAULT_OUTPUT_DIR).join(dirname)
}

/// File name of a single station briefing inside a briefing directory.
///
/// Bytes outside `[A-Za-z0-9_-]` are percent-encoded, so distinct codes
/// always map to distinct files.
pub fn briefing_file_name(code: &str) -> String {
    let mut safe = String::with_capacity(code.len());
    for byte in code.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            safe.push(byte as char);
        } else {
            safe.push_str(&format!("%{:02X}", byte));
        }
    }
    format!("{}.json", safe)
}
