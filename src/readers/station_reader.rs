use crate::error::{ProcessingError, Result};
use crate::models::{Coordinates, StationEntry};
use crate::readers::source::read_source_text;
use crate::utils::constants::DEFAULT_DELIMITER;
use crate::utils::coordinates::parse_coordinate;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::path::Path;
use tracing::info;
use validator::Validate;

/// Catalog row as exported; Portuguese headers are accepted as aliases
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(alias = "codigo")]
    code: String,
    #[serde(alias = "nome")]
    name: String,
    #[serde(alias = "latitude")]
    lat: String,
    #[serde(alias = "longitude")]
    lon: String,
    #[serde(default, alias = "tipo")]
    category: String,
    #[serde(default, alias = "pais", alias = "country")]
    countries: String,
}

pub struct StationReader {
    delimiter: u8,
}

impl StationReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read the station catalog file
    pub fn read_stations(&self, path: &Path) -> Result<Vec<StationEntry>> {
        let text = read_source_text(path)?;
        let stations = self.parse_stations(&text)?;
        info!(path = %path.display(), stations = stations.len(), "loaded station catalog");
        Ok(stations)
    }

    pub fn parse_stations(&self, text: &str) -> Result<Vec<StationEntry>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut stations = Vec::new();
        for (line, result) in reader.deserialize::<CatalogRow>().enumerate() {
            let row = result?;

            // Skip empty lines
            if row.code.is_empty() && row.name.is_empty() {
                continue;
            }

            let station = Self::convert_row(row).map_err(|e| match e {
                ProcessingError::InvalidCoordinate(msg) => {
                    ProcessingError::InvalidCoordinate(format!("catalog row {}: {}", line + 1, msg))
                }
                other => other,
            })?;
            stations.push(station);
        }

        Ok(stations)
    }

    fn convert_row(row: CatalogRow) -> Result<StationEntry> {
        let coordinates = Coordinates::new(parse_coordinate(&row.lat)?, parse_coordinate(&row.lon)?);
        coordinates.validate().map_err(|e| {
            ProcessingError::InvalidCoordinate(format!("station {}: {}", row.code, e))
        })?;

        let station = StationEntry::new(
            row.code,
            row.name,
            coordinates,
            row.category,
            StationEntry::parse_countries(&row.countries),
        );
        station.validate()?;
        Ok(station)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
