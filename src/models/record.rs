use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::*;
use crate::utils::decimal::{normalize_decimal, normalize_integer, normalize_month};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];

/// Calendar key (month + day) aligning readings of different years.
///
/// Ordering is chronological within a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOfYear {
    month: u32,
    day: u32,
}

impl DayOfYear {
    /// Returns `None` for impossible dates. 29/02 is accepted.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self { month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Parse `dd/mm`, or any full date format understood by [`parse_date`].
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Some(date) = parse_date(trimmed) {
            return Some(Self::from_date(date));
        }

        let (day, month) = trimmed.split_once('/')?;
        Self::new(month.trim().parse().ok()?, day.trim().parse().ok()?)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for DayOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.day, self.month)
    }
}

impl Serialize for DayOfYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse an event date as exported by spreadsheets (ISO or dd/mm/yyyy, with or without time)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Named columns of a station table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Year,
    DayOfYearLabel,
    HistoricalMax,
    HistoricalMin,
    HistoricalMean,
    CurrentLevel,
    FloodMagnitude,
    FloodDate,
    DroughtMagnitude,
    DroughtDate,
    AnnualVariability,
    Month,
    FloodFrequencyWeight,
    DroughtFrequencyWeight,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::Year,
        Field::DayOfYearLabel,
        Field::HistoricalMax,
        Field::HistoricalMin,
        Field::HistoricalMean,
        Field::CurrentLevel,
        Field::FloodMagnitude,
        Field::FloodDate,
        Field::DroughtMagnitude,
        Field::DroughtDate,
        Field::AnnualVariability,
        Field::Month,
        Field::FloodFrequencyWeight,
        Field::DroughtFrequencyWeight,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Year => COL_YEAR,
            Field::DayOfYearLabel => COL_DAY_OF_YEAR_LABEL,
            Field::HistoricalMax => COL_HISTORICAL_MAX,
            Field::HistoricalMin => COL_HISTORICAL_MIN,
            Field::HistoricalMean => COL_HISTORICAL_MEAN,
            Field::CurrentLevel => COL_CURRENT_LEVEL,
            Field::FloodMagnitude => COL_FLOOD_MAGNITUDE,
            Field::FloodDate => COL_FLOOD_DATE,
            Field::DroughtMagnitude => COL_DROUGHT_MAGNITUDE,
            Field::DroughtDate => COL_DROUGHT_DATE,
            Field::AnnualVariability => COL_ANNUAL_VARIABILITY,
            Field::Month => COL_MONTH,
            Field::FloodFrequencyWeight => COL_FLOOD_FREQUENCY_WEIGHT,
            Field::DroughtFrequencyWeight => COL_DROUGHT_FREQUENCY_WEIGHT,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Counts of non-empty cells that failed to parse and were treated as absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostics {
    pub rows: usize,
    pub invalid_values: BTreeMap<String, usize>,
}

impl ParseDiagnostics {
    pub fn record_invalid(&mut self, field: Field) {
        *self
            .invalid_values
            .entry(field.column_name().to_string())
            .or_default() += 1;
    }

    pub fn total_invalid(&self) -> usize {
        self.invalid_values.values().sum()
    }
}

/// One reporting period of a station table. Every field is optional: an
/// absent value is excluded from aggregation, never read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StationRecord {
    pub year: Option<i32>,
    pub day_of_year_label: Option<DayOfYear>,
    pub historical_max: Option<f64>,
    pub historical_min: Option<f64>,
    pub historical_mean: Option<f64>,
    pub current_level: Option<f64>,
    pub flood_magnitude: Option<f64>,
    pub flood_date: Option<NaiveDate>,
    pub drought_magnitude: Option<f64>,
    pub drought_date: Option<NaiveDate>,
    pub annual_variability: Option<f64>,
    pub month: Option<u32>,
    pub flood_frequency_weight: Option<f64>,
    pub drought_frequency_weight: Option<f64>,
}

impl StationRecord {
    /// Build a record from raw cell text, looked up per field.
    ///
    /// Cells that are non-empty but fail normalization become `None` and are
    /// counted in `diagnostics`.
    pub fn parse<'a, F>(cell: F, diagnostics: &mut ParseDiagnostics) -> Self
    where
        F: Fn(Field) -> &'a str,
    {
        let mut parse_cell = |field: Field| -> Option<Parsed> {
            let raw = cell(field);
            if raw.trim().is_empty() {
                return None;
            }
            let parsed = match field {
                Field::Year => normalize_integer(raw).map(|y| Parsed::Year(y as i32)),
                Field::DayOfYearLabel => DayOfYear::parse(raw).map(Parsed::Day),
                Field::FloodDate | Field::DroughtDate => parse_date(raw).map(Parsed::Date),
                Field::Month => normalize_month(raw)
                    .or_else(|| parse_date(raw).map(|date| date.month()))
                    .map(Parsed::Month),
                _ => normalize_decimal(raw).map(Parsed::Number),
            };
            if parsed.is_none() {
                tracing::trace!(field = %field, raw, "unparseable cell treated as absent");
                diagnostics.record_invalid(field);
            }
            parsed
        };

        let mut record = StationRecord::default();
        for field in Field::ALL {
            let value = parse_cell(field);
            record.assign(field, value);
        }
        record
    }

    fn assign(&mut self, field: Field, value: Option<Parsed>) {
        match (field, value) {
            (_, None) => {}
            (Field::Year, Some(Parsed::Year(y))) => self.year = Some(y),
            (Field::DayOfYearLabel, Some(Parsed::Day(d))) => self.day_of_year_label = Some(d),
            (Field::FloodDate, Some(Parsed::Date(d))) => self.flood_date = Some(d),
            (Field::DroughtDate, Some(Parsed::Date(d))) => self.drought_date = Some(d),
            (Field::Month, Some(Parsed::Month(m))) => self.month = Some(m),
            (field, Some(Parsed::Number(n))) => {
                let slot = match field {
                    Field::HistoricalMax => &mut self.historical_max,
                    Field::HistoricalMin => &mut self.historical_min,
                    Field::HistoricalMean => &mut self.historical_mean,
                    Field::CurrentLevel => &mut self.current_level,
                    Field::FloodMagnitude => &mut self.flood_magnitude,
                    Field::DroughtMagnitude => &mut self.drought_magnitude,
                    Field::AnnualVariability => &mut self.annual_variability,
                    Field::FloodFrequencyWeight => &mut self.flood_frequency_weight,
                    Field::DroughtFrequencyWeight => &mut self.drought_frequency_weight,
                    _ => return,
                };
                *slot = Some(n);
            }
            _ => {}
        }
    }
}

enum Parsed {
    Year(i32),
    Day(DayOfYear),
    Date(NaiveDate),
    Month(u32),
    Number(f64),
}

/// Validated, immutable history of one station, in source row order.
#[derive(Debug, Clone, Serialize)]
pub struct StationRecordTable {
    station_code: String,
    rows: Vec<StationRecord>,
    diagnostics: ParseDiagnostics,
}

impl StationRecordTable {
    /// Rejects tables where two rows share the same `(year, day_of_year_label)`.
    pub fn new(station_code: impl Into<String>, rows: Vec<StationRecord>) -> Result<Self> {
        let diagnostics = ParseDiagnostics {
            rows: rows.len(),
            ..ParseDiagnostics::default()
        };
        Self::with_diagnostics(station_code, rows, diagnostics)
    }

    pub fn with_diagnostics(
        station_code: impl Into<String>,
        rows: Vec<StationRecord>,
        diagnostics: ParseDiagnostics,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if let (Some(year), Some(label)) = (row.year, row.day_of_year_label) {
                if !seen.insert((year, label)) {
                    return Err(ProcessingError::DuplicateRow {
                        year,
                        label: label.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            station_code: station_code.into(),
            rows,
            diagnostics,
        })
    }

    pub fn station_code(&self) -> &str {
        &self.station_code
    }

    pub fn rows(&self) -> &[StationRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse_row(cells: &[(Field, &'static str)]) -> (StationRecord, ParseDiagnostics) {
        let map: HashMap<Field, &'static str> = cells.iter().copied().collect();
        let mut diagnostics = ParseDiagnostics::default();
        let record = StationRecord::parse(|f| map.get(&f).copied().unwrap_or(""), &mut diagnostics);
        (record, diagnostics)
    }

    #[test]
    fn test_day_of_year_parsing() {
        let expected = DayOfYear::new(1, 15).unwrap();
        assert_eq!(DayOfYear::parse("15/01"), Some(expected));
        assert_eq!(DayOfYear::parse("15/01/2024"), Some(expected));
        assert_eq!(DayOfYear::parse("2024-01-15"), Some(expected));
        assert_eq!(DayOfYear::parse("2024-01-15 00:00:00"), Some(expected));
        assert_eq!(DayOfYear::parse("29/02"), DayOfYear::new(2, 29));
        assert_eq!(DayOfYear::parse("31/02"), None);
        assert_eq!(DayOfYear::parse("jan"), None);
        assert_eq!(expected.to_string(), "15/01");
    }

    #[test]
    fn test_day_of_year_ordering_is_chronological() {
        let jan_31 = DayOfYear::new(1, 31).unwrap();
        let feb_01 = DayOfYear::new(2, 1).unwrap();
        let dec_01 = DayOfYear::new(12, 1).unwrap();
        assert!(jan_31 < feb_01);
        assert!(feb_01 < dec_01);
    }

    #[test]
    fn test_record_parse_normalizes_locale_decimals() {
        let (record, diagnostics) = parse_row(&[
            (Field::Year, "2021"),
            (Field::DayOfYearLabel, "01/03"),
            (Field::HistoricalMax, "1250,5"),
            (Field::CurrentLevel, "abc"),
            (Field::FloodDate, "12/06/2021"),
            (Field::Month, "6"),
        ]);

        assert_eq!(record.year, Some(2021));
        assert_eq!(record.day_of_year_label, DayOfYear::new(3, 1));
        assert_eq!(record.historical_max, Some(1250.5));
        assert_eq!(record.current_level, None);
        assert_eq!(record.flood_date, NaiveDate::from_ymd_opt(2021, 6, 12));
        assert_eq!(record.month, Some(6));
        assert_eq!(record.historical_min, None);
        assert_eq!(diagnostics.total_invalid(), 1);
        assert_eq!(diagnostics.invalid_values.get(COL_CURRENT_LEVEL), Some(&1));
    }

    #[test]
    fn test_empty_cells_are_absent_not_invalid() {
        let (record, diagnostics) = parse_row(&[(Field::Year, "  ")]);
        assert_eq!(record, StationRecord::default());
        assert_eq!(diagnostics.total_invalid(), 0);
    }

    #[test]
    fn test_duplicate_year_and_label_rejected() {
        let row = StationRecord {
            year: Some(2020),
            day_of_year_label: DayOfYear::new(5, 1),
            ..StationRecord::default()
        };
        let result = StationRecordTable::new("1", vec![row.clone(), row]);
        assert!(matches!(result, Err(ProcessingError::DuplicateRow { year: 2020, .. })));
    }

    #[test]
    fn test_rows_without_year_are_not_duplicates() {
        let row = StationRecord {
            day_of_year_label: DayOfYear::new(5, 1),
            ..StationRecord::default()
        };
        let table = StationRecordTable::new("1", vec![row.clone(), row]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.diagnostics().rows, 2);
    }
}
