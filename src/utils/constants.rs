/// File names
pub const STATIONS_FILE: &str = "stations.csv";
pub const STATION_TABLE_EXTENSION: &str = "csv";

/// Directory names
pub const DEFAULT_DATA_DIR: &str = "data/tables";
pub const DEFAULT_STATIONS_DIR: &str = "data/stations";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Spreadsheet exports from pt-BR locales separate fields with a semicolon
pub const DEFAULT_DELIMITER: char = ';';

/// Analytics defaults
pub const DEFAULT_TOP_EVENTS: usize = 5;
pub const DEFAULT_TREND_YEARS: usize = 10;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "RIOS";

/// Canonical column headers of a station table
pub const COL_YEAR: &str = "year";
pub const COL_DAY_OF_YEAR_LABEL: &str = "day_of_year_label";
pub const COL_HISTORICAL_MAX: &str = "historical_max";
pub const COL_HISTORICAL_MIN: &str = "historical_min";
pub const COL_HISTORICAL_MEAN: &str = "historical_mean";
pub const COL_CURRENT_LEVEL: &str = "current_level";
pub const COL_FLOOD_MAGNITUDE: &str = "flood_magnitude";
pub const COL_FLOOD_DATE: &str = "flood_date";
pub const COL_DROUGHT_MAGNITUDE: &str = "drought_magnitude";
pub const COL_DROUGHT_DATE: &str = "drought_date";
pub const COL_ANNUAL_VARIABILITY: &str = "annual_variability";
pub const COL_MONTH: &str = "month";
pub const COL_FLOOD_FREQUENCY_WEIGHT: &str = "flood_frequency_weight";
pub const COL_DROUGHT_FREQUENCY_WEIGHT: &str = "drought_frequency_weight";
