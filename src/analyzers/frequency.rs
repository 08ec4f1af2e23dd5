use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{StationRecord, StationRecordTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightKind {
    Flood,
    Drought,
}

impl WeightKind {
    pub fn weight(&self, record: &StationRecord) -> Option<f64> {
        match self {
            WeightKind::Flood => record.flood_frequency_weight,
            WeightKind::Drought => record.drought_frequency_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyFrequency {
    pub month: u32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyShare {
    pub month: u32,
    pub percent: f64,
}

/// Seasonality of extremes: summed weight per calendar month, positive totals only
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrequencyDistribution {
    months: Vec<MonthlyFrequency>,
}

impl FrequencyDistribution {
    pub fn compute(table: &StationRecordTable, kind: WeightKind) -> Self {
        Self::compute_by(table, |record| kind.weight(record))
    }

    /// Group present weights by month and keep months whose total is strictly
    /// positive, in ascending month order.
    pub fn compute_by<W>(table: &StationRecordTable, weight: W) -> Self
    where
        W: Fn(&StationRecord) -> Option<f64>,
    {
        let mut totals: BTreeMap<u32, f64> = BTreeMap::new();
        for row in table.rows() {
            if let (Some(month), Some(value)) = (row.month, weight(row)) {
                *totals.entry(month).or_insert(0.0) += value;
            }
        }

        let months = totals
            .into_iter()
            .filter(|(_, total)| *total > 0.0)
            .map(|(month, total)| MonthlyFrequency { month, total })
            .collect();

        Self { months }
    }

    pub fn months(&self) -> &[MonthlyFrequency] {
        &self.months
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn get(&self, month: u32) -> Option<f64> {
        self.months
            .iter()
            .find(|entry| entry.month == month)
            .map(|entry| entry.total)
    }

    pub fn total(&self) -> f64 {
        self.months.iter().map(|entry| entry.total).sum()
    }

    /// Percentage of the overall total per month; empty when there is no signal.
    pub fn shares(&self) -> Vec<MonthlyShare> {
        let total = self.total();
        if total <= 0.0 {
            return Vec::new();
        }

        self.months
            .iter()
            .map(|entry| MonthlyShare {
                month: entry.month,
                percent: 100.0 * entry.total / total,
            })
            .collect()
    }

    pub fn peak_month(&self) -> Option<u32> {
        self.months
            .iter()
            .fold(None::<&MonthlyFrequency>, |best, entry| match best {
                Some(b) if b.total >= entry.total => Some(b),
                _ => Some(entry),
            })
            .map(|entry| entry.month)
    }
}
