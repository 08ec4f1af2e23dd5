use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{DayOfYear, StationRecordTable};

/// One day of the historical envelope.
///
/// Absent bounds stay absent so the band shows a gap on that day instead
/// of collapsing to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopePoint {
    pub day_of_year_label: DayOfYear,
    pub historical_max: Option<f64>,
    pub historical_min: Option<f64>,
    pub historical_mean: Option<f64>,
    pub current_level: Option<f64>,
}

impl EnvelopePoint {
    fn empty(day_of_year_label: DayOfYear) -> Self {
        Self {
            day_of_year_label,
            historical_max: None,
            historical_min: None,
            historical_mean: None,
            current_level: None,
        }
    }

    pub fn band_width(&self) -> Option<f64> {
        Some(self.historical_max? - self.historical_min?)
    }
}

/// Most recent gauge reading of the current cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestReading {
    pub value: f64,
    pub day_of_year_label: Option<DayOfYear>,
    pub year: Option<i32>,
    pub row_index: usize,
}

pub struct EnvelopeAggregator;

impl EnvelopeAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Historical min/max/mean band plus the current trace, one point per
    /// distinct day-of-year label in chronological order.
    ///
    /// When several rows share a label, each historical statistic takes the
    /// first present value in row order and the current level takes the last.
    /// Rows without a label cannot be placed and are skipped.
    pub fn envelope(&self, table: &StationRecordTable) -> Vec<EnvelopePoint> {
        let mut points: BTreeMap<DayOfYear, EnvelopePoint> = BTreeMap::new();

        for row in table.rows() {
            let Some(label) = row.day_of_year_label else {
                continue;
            };
            let point = points
                .entry(label)
                .or_insert_with(|| EnvelopePoint::empty(label));

            point.historical_max = point.historical_max.or(row.historical_max);
            point.historical_min = point.historical_min.or(row.historical_min);
            point.historical_mean = point.historical_mean.or(row.historical_mean);
            if row.current_level.is_some() {
                point.current_level = row.current_level;
            }
        }

        points.into_values().collect()
    }

    /// Last row in table order carrying a current level.
    ///
    /// Recency decides, not magnitude. `None` means the station has no current
    /// reading at all, which is distinct from a reading of zero.
    pub fn latest_reading(&self, table: &StationRecordTable) -> Option<LatestReading> {
        table
            .rows()
            .iter()
            .enumerate()
            .rev()
            .find_map(|(row_index, row)| {
                row.current_level.map(|value| LatestReading {
                    value,
                    day_of_year_label: row.day_of_year_label,
                    year: row.year,
                    row_index,
                })
            })
    }
}

impl Default for EnvelopeAggregator {
    fn default() -> Self {
        Self::new()
    }
}
