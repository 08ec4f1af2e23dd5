use serde::Serialize;
use std::collections::HashSet;

use crate::models::StationRecordTable;
use crate::utils::constants::DEFAULT_TREND_YEARS;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariabilityPoint {
    pub year: i32,
    pub annual_variability: f64,
}

/// Decadal Hmax−Hmin amplitude series
pub struct VariabilityTrend {
    window: usize,
}

impl VariabilityTrend {
    pub fn new() -> Self {
        Self {
            window: DEFAULT_TREND_YEARS,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Most recent `window` years with a valid variability, ascending by year.
    ///
    /// A year repeated over several rows contributes its first row only.
    pub fn compute(&self, table: &StationRecordTable) -> Vec<VariabilityPoint> {
        let mut seen = HashSet::new();
        let mut points: Vec<VariabilityPoint> = table
            .rows()
            .iter()
            .filter_map(|row| {
                Some(VariabilityPoint {
                    year: row.year?,
                    annual_variability: row.annual_variability?,
                })
            })
            .filter(|point| seen.insert(point.year))
            .collect();

        points.sort_by(|a, b| b.year.cmp(&a.year));
        points.truncate(self.window);
        points.sort_by_key(|point| point.year);
        points
    }
}

impl Default for VariabilityTrend {
    fn default() -> Self {
        Self::new()
    }
}
