use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::models::Field;
use crate::utils::constants::*;

/// Application settings: file locations, CSV dialect and analytics limits.
///
/// Layered from built-in defaults, an optional TOML file and `RIOS_*`
/// environment variables (`RIOS_COLUMNS__CURRENT_LEVEL=cota_atual` for
/// nested keys).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data_dir: PathBuf,

    pub stations_file: PathBuf,

    pub delimiter: char,

    #[validate(range(min = 1))]
    pub top_events: usize,

    #[validate(range(min = 1))]
    pub trend_years: usize,

    pub columns: ColumnLayout,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            stations_file: PathBuf::from(DEFAULT_STATIONS_DIR).join(STATIONS_FILE),
            delimiter: DEFAULT_DELIMITER,
            top_events: DEFAULT_TOP_EVENTS,
            trend_years: DEFAULT_TREND_YEARS,
            columns: ColumnLayout::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                return Err(ProcessingError::MissingSource {
                    path: path.to_path_buf(),
                });
            }
            builder = builder.add_source(File::from(path));
        }

        let config: AppConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        config.delimiter_byte()?;
        Ok(config)
    }

    /// The csv crate wants a single byte
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ProcessingError::InvalidFormat(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }
}

/// Header name of every field in a station table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnLayout {
    pub year: String,
    pub day_of_year_label: String,
    pub historical_max: String,
    pub historical_min: String,
    pub historical_mean: String,
    pub current_level: String,
    pub flood_magnitude: String,
    pub flood_date: String,
    pub drought_magnitude: String,
    pub drought_date: String,
    pub annual_variability: String,
    pub month: String,
    pub flood_frequency_weight: String,
    pub drought_frequency_weight: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            year: COL_YEAR.to_string(),
            day_of_year_label: COL_DAY_OF_YEAR_LABEL.to_string(),
            historical_max: COL_HISTORICAL_MAX.to_string(),
            historical_min: COL_HISTORICAL_MIN.to_string(),
            historical_mean: COL_HISTORICAL_MEAN.to_string(),
            current_level: COL_CURRENT_LEVEL.to_string(),
            flood_magnitude: COL_FLOOD_MAGNITUDE.to_string(),
            flood_date: COL_FLOOD_DATE.to_string(),
            drought_magnitude: COL_DROUGHT_MAGNITUDE.to_string(),
            drought_date: COL_DROUGHT_DATE.to_string(),
            annual_variability: COL_ANNUAL_VARIABILITY.to_string(),
            month: COL_MONTH.to_string(),
            flood_frequency_weight: COL_FLOOD_FREQUENCY_WEIGHT.to_string(),
            drought_frequency_weight: COL_DROUGHT_FREQUENCY_WEIGHT.to_string(),
        }
    }
}

impl ColumnLayout {
    pub fn header_for(&self, field: Field) -> &str {
        match field {
            Field::Year => &self.year,
            Field::DayOfYearLabel => &self.day_of_year_label,
            Field::HistoricalMax => &self.historical_max,
            Field::HistoricalMin => &self.historical_min,
            Field::HistoricalMean => &self.historical_mean,
            Field::CurrentLevel => &self.current_level,
            Field::FloodMagnitude => &self.flood_magnitude,
            Field::FloodDate => &self.flood_date,
            Field::DroughtMagnitude => &self.drought_magnitude,
            Field::DroughtDate => &self.drought_date,
            Field::AnnualVariability => &self.annual_variability,
            Field::Month => &self.month,
            Field::FloodFrequencyWeight => &self.flood_frequency_weight,
            Field::DroughtFrequencyWeight => &self.drought_frequency_weight,
        }
    }
}
