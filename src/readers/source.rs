use crate::error::{ProcessingError, Result};
use encoding_rs::WINDOWS_1252;
use std::path::Path;

/// Read a tabular source as text.
///
/// Spreadsheet exports are frequently Windows-1252 rather than UTF-8; such
/// bytes are transcoded so accented station names survive. A UTF-8 BOM is
/// stripped. A missing file is a [`ProcessingError::MissingSource`].
pub fn read_source_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ProcessingError::MissingSource {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    Ok(decode_source_bytes(&bytes))
}

pub fn decode_source_bytes(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            tracing::debug!("source is not UTF-8, decoded as Windows-1252");
            text.into_owned()
        }
    }
}
