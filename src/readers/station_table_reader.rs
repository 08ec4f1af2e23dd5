use crate::config::{AppConfig, ColumnLayout};
use crate::error::{ProcessingError, Result};
use crate::models::{Field, ParseDiagnostics, StationRecord, StationRecordTable};
use crate::readers::source::read_source_text;
use crate::utils::constants::DEFAULT_DELIMITER;
use crate::utils::filename::station_table_path;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::{debug, info};

/// Loads a station's history from `{data_dir}/{code}.csv`.
///
/// Columns are located by header name once per file; a configured column
/// absent from the header is a hard error, while unparseable cells become
/// absent values.
#[derive(Debug, Clone)]
pub struct StationTableReader {
    delimiter: u8,
    layout: ColumnLayout,
}

impl StationTableReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
            layout: ColumnLayout::default(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new()
            .with_delimiter(config.delimiter_byte()?)
            .with_layout(config.columns.clone()))
    }

    /// Read the table of one station from the data directory
    pub fn read_station(&self, data_dir: &Path, code: &str) -> Result<StationRecordTable> {
        let path = station_table_path(data_dir, code);
        self.read_table(&path, code)
    }

    pub fn read_table(&self, path: &Path, code: &str) -> Result<StationRecordTable> {
        let text = read_source_text(path)?;
        let table = self.parse_table(&text, code, path)?;

        info!(
            station = code,
            rows = table.len(),
            invalid_values = table.diagnostics().total_invalid(),
            "loaded station table"
        );
        Ok(table)
    }

    /// Parse CSV text; `source` only labels errors
    pub fn parse_table(&self, text: &str, code: &str, source: &Path) -> Result<StationRecordTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let columns = self.resolve_columns(&headers, source)?;

        let mut rows = Vec::new();
        let mut diagnostics = ParseDiagnostics::default();
        let mut skipped_blank = 0usize;

        for result in reader.records() {
            let record = result?;

            // Spreadsheet exports pad the sheet with separator-only lines
            if record.iter().all(|cell| cell.is_empty()) {
                skipped_blank += 1;
                continue;
            }

            let row = StationRecord::parse(
                |field| record.get(columns[field as usize]).unwrap_or(""),
                &mut diagnostics,
            );
            rows.push(row);
        }

        diagnostics.rows = rows.len();
        if diagnostics.total_invalid() > 0 {
            debug!(
                station = code,
                invalid = ?diagnostics.invalid_values,
                "cells dropped as unparseable"
            );
        }
        if skipped_blank > 0 {
            debug!(station = code, skipped_blank, "blank lines skipped");
        }

        StationRecordTable::with_diagnostics(code, rows, diagnostics)
    }

    fn resolve_columns(&self, headers: &StringRecord, source: &Path) -> Result<[usize; 14]> {
        let mut columns = [0usize; 14];
        for field in Field::ALL {
            let wanted = self.layout.header_for(field);
            columns[field as usize] = headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(wanted.trim()))
                .ok_or_else(|| ProcessingError::MissingColumn {
                    column: wanted.to_string(),
                    path: source.to_path_buf(),
                })?;
        }
        Ok(columns)
    }
}

impl Default for StationTableReader {
    fn default() -> Self {
        Self::new()
    }
}
