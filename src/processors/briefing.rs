use crate::analyzers::{
    EnvelopeAggregator, EnvelopePoint, EventKind, ExtremeEvent, ExtremeEventRanker,
    FrequencyDistribution, LatestReading, VariabilityPoint, VariabilityTrend, WeightKind,
};
use crate::config::AppConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{ParseDiagnostics, StationEntry, StationRecordTable};
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Everything the situation room shows for one station
#[derive(Debug, Clone, Serialize)]
pub struct StationBriefing {
    pub station: StationEntry,
    pub latest_reading: Option<LatestReading>,
    pub envelope: Vec<EnvelopePoint>,
    pub variability_trend: Vec<VariabilityPoint>,
    pub top_floods: Vec<ExtremeEvent>,
    pub top_droughts: Vec<ExtremeEvent>,
    pub flood_frequency: FrequencyDistribution,
    pub drought_frequency: FrequencyDistribution,
    pub diagnostics: ParseDiagnostics,
}

impl StationBriefing {
    /// Headline line: latest level in whole centimetres, or a no-data notice
    pub fn headline(&self) -> String {
        match &self.latest_reading {
            Some(reading) => {
                let when = reading
                    .day_of_year_label
                    .map(|label| format!(" on {}", label))
                    .unwrap_or_default();
                format!(
                    "{} — {}: {} cm{}",
                    self.station.name,
                    self.station.code,
                    reading.value.trunc() as i64,
                    when
                )
            }
            None => format!(
                "{} — {}: no recent data available for this station",
                self.station.name, self.station.code
            ),
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str(&format!("=== {} ===\n", self.headline()));
        summary.push_str(&format!("Envelope days: {}\n", self.envelope.len()));

        let trend = if self.variability_trend.is_empty() {
            "no data".to_string()
        } else {
            self.variability_trend
                .iter()
                .map(|p| format!("{}: {:.0}", p.year, p.annual_variability))
                .collect::<Vec<_>>()
                .join(", ")
        };
        summary.push_str(&format!("Decadal variability (Hmax-Hmin): {}\n", trend));

        for (kind, events) in [
            (EventKind::Flood, &self.top_floods),
            (EventKind::Drought, &self.top_droughts),
        ] {
            summary.push_str(&format!("\nLast {} {} events:\n", events.len(), kind));
            if events.is_empty() {
                summary.push_str("  no data\n");
            }
            for (i, event) in events.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. {} ({}): {:.0} cm\n",
                    i + 1,
                    event.date.format("%d/%m/%Y"),
                    event.year,
                    event.magnitude
                ));
            }
        }

        for (title, distribution) in [
            ("Maxima frequency", &self.flood_frequency),
            ("Minima frequency", &self.drought_frequency),
        ] {
            let shares = distribution.shares();
            let line = if shares.is_empty() {
                "no data".to_string()
            } else {
                shares
                    .iter()
                    .map(|s| format!("{:02}: {:.1}%", s.month, s.percent))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            summary.push_str(&format!("\n{}: {}", title, line));
        }

        if self.diagnostics.total_invalid() > 0 {
            summary.push_str(&format!(
                "\n\n{} unparseable cells ignored",
                self.diagnostics.total_invalid()
            ));
        }

        summary
    }
}

/// Runs every analytic over a station table
pub struct BriefingProcessor {
    envelope: EnvelopeAggregator,
    trend: VariabilityTrend,
    ranker: ExtremeEventRanker,
}

impl BriefingProcessor {
    pub fn new() -> Self {
        Self {
            envelope: EnvelopeAggregator::new(),
            trend: VariabilityTrend::new(),
            ranker: ExtremeEventRanker::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            envelope: EnvelopeAggregator::new(),
            trend: VariabilityTrend::new().with_window(config.trend_years),
            ranker: ExtremeEventRanker::new().with_limit(config.top_events),
        }
    }

    pub fn brief(&self, station: &StationEntry, table: &StationRecordTable) -> StationBriefing {
        debug!(station = %station.code, rows = table.len(), "briefing station");

        StationBriefing {
            station: station.clone(),
            latest_reading: self.envelope.latest_reading(table),
            envelope: self.envelope.envelope(table),
            variability_trend: self.trend.compute(table),
            top_floods: self.ranker.rank(table, EventKind::Flood),
            top_droughts: self.ranker.rank(table, EventKind::Drought),
            flood_frequency: FrequencyDistribution::compute(table, WeightKind::Flood),
            drought_frequency: FrequencyDistribution::compute(table, WeightKind::Drought),
            diagnostics: table.diagnostics().clone(),
        }
    }

    /// Brief many stations in parallel, preserving input order
    pub fn brief_all(
        &self,
        inputs: &[(StationEntry, StationRecordTable)],
        max_workers: usize,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<StationBriefing>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_workers.max(1))
            .build()
            .map_err(|e| ProcessingError::InvalidFormat(format!("thread pool: {}", e)))?;

        let briefings: Vec<StationBriefing> = pool.install(|| {
            inputs
                .par_iter()
                .map(|(station, table)| {
                    let briefing = self.brief(station, table);
                    if let Some(p) = progress {
                        p.increment(1);
                    }
                    briefing
                })
                .collect()
        });

        Ok(briefings)
    }
}

impl Default for BriefingProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, DayOfYear, StationRecord};
    use chrono::NaiveDate;

    fn manaus() -> StationEntry {
        StationEntry::new(
            "14990000".to_string(),
            "Manaus".to_string(),
            Coordinates::new(-3.1383, -60.0272),
            "fluviometrica".to_string(),
            StationEntry::parse_countries("Brasil"),
        )
    }

    fn sample_table() -> StationRecordTable {
        let rows = (0..12u32)
            .map(|i| StationRecord {
                year: Some(2012 + i as i32),
                day_of_year_label: DayOfYear::new(i + 1, 1),
                historical_max: Some(2900.0),
                historical_min: Some(1500.0),
                historical_mean: Some(2200.0),
                current_level: (i < 7).then(|| 2000.0 + f64::from(i) * 50.5),
                flood_magnitude: Some(2800.0 + f64::from(i)),
                flood_date: NaiveDate::from_ymd_opt(2012 + i as i32, 6, 10),
                drought_magnitude: Some(1600.0 - f64::from(i)),
                drought_date: NaiveDate::from_ymd_opt(2012 + i as i32, 10, 25),
                annual_variability: Some(1200.0 + f64::from(i)),
                month: Some(i + 1),
                flood_frequency_weight: Some(if i == 5 { 4.0 } else { 0.0 }),
                drought_frequency_weight: Some(if i >= 9 { 1.0 } else { 0.0 }),
            })
            .collect();
        StationRecordTable::new("14990000", rows).unwrap()
    }

    #[test]
    fn test_brief_runs_every_analytic() {
        let briefing = BriefingProcessor::new().brief(&manaus(), &sample_table());

        assert_eq!(briefing.envelope.len(), 12);
        assert_eq!(briefing.variability_trend.len(), 10);
        assert_eq!(briefing.variability_trend[0].year, 2014);
        assert_eq!(briefing.top_floods.len(), 5);
        assert_eq!(briefing.top_floods[0].year, 2023);
        assert_eq!(briefing.top_droughts[0].year, 2023);
        assert_eq!(briefing.flood_frequency.months().len(), 1);
        assert_eq!(briefing.drought_frequency.months().len(), 3);

        let latest = briefing.latest_reading.as_ref().unwrap();
        assert_eq!(latest.day_of_year_label, DayOfYear::new(7, 1));
        assert_eq!(latest.value, 2303.0);
    }

    #[test]
    fn test_headline() {
        let briefing = BriefingProcessor::new().brief(&manaus(), &sample_table());
        assert_eq!(
            briefing.headline(),
            "Manaus — 14990000: 2303 cm on 01/07"
        );

        let empty = StationRecordTable::new("14990000", Vec::new()).unwrap();
        let briefing = BriefingProcessor::new().brief(&manaus(), &empty);
        assert!(briefing.headline().contains("no recent data"));
        assert!(briefing.summary().contains("no data"));
    }

    #[test]
    fn test_from_config_limits() {
        let config = AppConfig {
            top_events: 2,
            trend_years: 3,
            ..AppConfig::default()
        };
        let briefing = BriefingProcessor::from_config(&config).brief(&manaus(), &sample_table());
        assert_eq!(briefing.top_floods.len(), 2);
        assert_eq!(briefing.variability_trend.len(), 3);
    }

    #[test]
    fn test_brief_all_preserves_order() {
        let mut other = manaus();
        other.code = "15400000".to_string();
        let inputs = vec![(manaus(), sample_table()), (other, sample_table())];

        let briefings = BriefingProcessor::new().brief_all(&inputs, 2, None).unwrap();
        let codes: Vec<&str> = briefings.iter().map(|b| b.station.code.as_str()).collect();
        assert_eq!(codes, vec!["14990000", "15400000"]);
    }

    #[test]
    fn test_briefing_serializes() {
        let briefing = BriefingProcessor::new().brief(&manaus(), &sample_table());
        let json = serde_json::to_value(&briefing).unwrap();

        assert_eq!(json["station"]["code"], "14990000");
        assert_eq!(json["envelope"][0]["day_of_year_label"], "01/01");
        assert_eq!(json["latest_reading"]["value"], 2303.0);
        assert_eq!(json["flood_frequency"]["months"][0]["month"], 6);
    }
}
