use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{StationRecord, StationRecordTable};
use crate::utils::constants::DEFAULT_TOP_EVENTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Flood,
    Drought,
}

impl EventKind {
    /// Floods rank the highest peaks first, droughts the lowest troughs.
    pub fn order(&self) -> RankOrder {
        match self {
            EventKind::Flood => RankOrder::Descending,
            EventKind::Drought => RankOrder::Ascending,
        }
    }

    pub fn magnitude(&self, record: &StationRecord) -> Option<f64> {
        match self {
            EventKind::Flood => record.flood_magnitude,
            EventKind::Drought => record.drought_magnitude,
        }
    }

    pub fn date(&self, record: &StationRecord) -> Option<NaiveDate> {
        match self {
            EventKind::Flood => record.flood_date,
            EventKind::Drought => record.drought_date,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EventKind::Flood => "Flood",
            EventKind::Drought => "Drought",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeEvent {
    pub year: i32,
    pub date: NaiveDate,
    pub magnitude: f64,
}

pub struct ExtremeEventRanker {
    limit: usize,
}

impl ExtremeEventRanker {
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_TOP_EVENTS,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn rank(&self, table: &StationRecordTable, kind: EventKind) -> Vec<ExtremeEvent> {
        self.rank_by(
            table,
            |record| kind.magnitude(record),
            |record| kind.date(record),
            kind.order(),
        )
    }

    /// Top events by magnitude using arbitrary field selectors.
    ///
    /// Rows missing the year, the magnitude or the date are excluded. Equal
    /// magnitudes keep their row order. Never pads when fewer rows qualify.
    pub fn rank_by<M, D>(
        &self,
        table: &StationRecordTable,
        magnitude: M,
        date: D,
        order: RankOrder,
    ) -> Vec<ExtremeEvent>
    where
        M: Fn(&StationRecord) -> Option<f64>,
        D: Fn(&StationRecord) -> Option<NaiveDate>,
    {
        let mut events: Vec<ExtremeEvent> = table
            .rows()
            .iter()
            .filter_map(|row| {
                Some(ExtremeEvent {
                    year: row.year?,
                    date: date(row)?,
                    magnitude: magnitude(row)?,
                })
            })
            .collect();

        // sort_by is stable, ties stay in row order
        match order {
            RankOrder::Ascending => events.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude)),
            RankOrder::Descending => events.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude)),
        }
        events.truncate(self.limit);
        events
    }
}

impl Default for ExtremeEventRanker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn flood_row(year: i32, magnitude: Option<f64>, when: Option<NaiveDate>) -> StationRecord {
        StationRecord {
            year: Some(year),
            flood_magnitude: magnitude,
            flood_date: when,
            ..StationRecord::default()
        }
    }

    fn drought_row(year: i32, magnitude: f64) -> StationRecord {
        StationRecord {
            year: Some(year),
            drought_magnitude: Some(magnitude),
            drought_date: Some(date(year, 10, 20)),
            ..StationRecord::default()
        }
    }

    #[test]
    fn test_flood_ranking_is_stable_on_ties() {
        let table = StationRecordTable::new(
            "1",
            vec![
                flood_row(2000, Some(300.0), Some(date(2000, 6, 1))),
                flood_row(2001, Some(300.0), Some(date(2001, 6, 2))),
                flood_row(2002, Some(150.0), Some(date(2002, 6, 3))),
                flood_row(2003, Some(420.0), Some(date(2003, 6, 4))),
            ],
        )
        .unwrap();

        let events = ExtremeEventRanker::new().rank(&table, EventKind::Flood);

        let magnitudes: Vec<f64> = events.iter().map(|e| e.magnitude).collect();
        assert_eq!(magnitudes, vec![420.0, 300.0, 300.0, 150.0]);
        assert_eq!(events[1].year, 2000);
        assert_eq!(events[2].year, 2001);
    }

    #[test]
    fn test_drought_ranking_ascending_top_five() {
        let rows = [50.0, 12.0, 33.0, 8.0, 90.0, 15.0, 12.0]
            .iter()
            .enumerate()
            .map(|(i, m)| drought_row(1990 + i as i32, *m))
            .collect();
        let table = StationRecordTable::new("1", rows).unwrap();

        let events = ExtremeEventRanker::new().rank(&table, EventKind::Drought);

        assert_eq!(events.len(), 5);
        let ranked: Vec<(i32, f64)> = events.iter().map(|e| (e.year, e.magnitude)).collect();
        assert_eq!(
            ranked,
            vec![(1993, 8.0), (1991, 12.0), (1996, 12.0), (1995, 15.0), (1992, 33.0)]
        );
    }

    #[test]
    fn test_incomplete_rows_excluded_and_no_padding() {
        let table = StationRecordTable::new(
            "1",
            vec![
                flood_row(2010, Some(500.0), None),
                flood_row(2011, None, Some(date(2011, 5, 5))),
                flood_row(2012, Some(480.0), Some(date(2012, 5, 6))),
            ],
        )
        .unwrap();

        let events = ExtremeEventRanker::new().rank(&table, EventKind::Flood);
        assert_eq!(
            events,
            vec![ExtremeEvent {
                year: 2012,
                date: date(2012, 5, 6),
                magnitude: 480.0
            }]
        );

        assert!(ExtremeEventRanker::new()
            .rank(&table, EventKind::Drought)
            .is_empty());
    }

    #[test]
    fn test_rank_by_custom_selectors() {
        let mut row = flood_row(2015, Some(1.0), Some(date(2015, 1, 1)));
        row.historical_max = Some(77.0);
        let table = StationRecordTable::new("1", vec![row]).unwrap();

        let events = ExtremeEventRanker::new().with_limit(1).rank_by(
            &table,
            |r| r.historical_max,
            |r| r.flood_date,
            RankOrder::Descending,
        );
        assert_eq!(events[0].magnitude, 77.0);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let table = StationRecordTable::new(
            "1",
            vec![
                flood_row(2000, Some(1.0), Some(date(2000, 1, 1))),
                flood_row(2001, Some(1.0), Some(date(2001, 1, 1))),
            ],
        )
        .unwrap();
        let ranker = ExtremeEventRanker::new();
        assert_eq!(
            ranker.rank(&table, EventKind::Flood),
            ranker.rank(&table, EventKind::Flood)
        );
    }
}
