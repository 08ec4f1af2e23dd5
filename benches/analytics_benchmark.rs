use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rios_online::analyzers::{
    EnvelopeAggregator, EventKind, ExtremeEventRanker, FrequencyDistribution, VariabilityTrend,
    WeightKind,
};
use rios_online::models::{DayOfYear, StationRecord, StationRecordTable};
use rios_online::readers::StationTableReader;
use rios_online::utils::normalize_decimal;
use std::path::Path;

// One row per day over `years` years, with yearly extremes on the first day of each year
fn create_test_table(years: i32) -> StationRecordTable {
    let mut rows = Vec::new();
    let base_date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

    for offset in 0..(years * 365) {
        let date = base_date + chrono::Duration::days(offset as i64);
        let year = 2000 + offset / 365;
        let level = 1800.0 + ((offset % 365) as f64 / 58.0).sin() * 400.0;
        let first_of_year = offset % 365 == 0;

        rows.push(StationRecord {
            year: first_of_year.then_some(year),
            day_of_year_label: (offset < 365).then(|| DayOfYear::from_date(date)),
            historical_max: Some(level + 300.0),
            historical_min: Some(level - 300.0),
            historical_mean: Some(level),
            current_level: Some(level + (year % 7) as f64),
            flood_magnitude: first_of_year.then_some(2800.0 + (year % 13) as f64 * 10.0),
            flood_date: first_of_year.then_some(date),
            drought_magnitude: first_of_year.then_some(1200.0 + (year % 11) as f64 * 10.0),
            drought_date: first_of_year.then_some(date),
            annual_variability: first_of_year.then_some(10.0 + (year % 5) as f64),
            month: Some(((offset % 365) / 31 + 1).min(12) as u32),
            flood_frequency_weight: Some((offset % 3) as f64),
            drought_frequency_weight: Some((offset % 4) as f64),
        });
    }

    StationRecordTable::new("14990000", rows).unwrap()
}

fn create_test_csv(rows: usize) -> String {
    let mut text = String::from(
        "year;day_of_year_label;historical_max;historical_min;historical_mean;current_level;\
         flood_magnitude;flood_date;drought_magnitude;drought_date;annual_variability;month;\
         flood_frequency_weight;drought_frequency_weight\n",
    );
    for i in 0..rows {
        let day = i % 28 + 1;
        let month = i / 28 % 12 + 1;
        text.push_str(&format!(
            "{};{:02}/{:02};2100,5;1500,25;1800;1650,75;2990;16/06/2021;1350;24/10/2021;11,2;{};1;0\n",
            2000 + i, day, month, month
        ));
    }
    text
}

fn benchmark_envelope(c: &mut Criterion) {
    let table = create_test_table(30);
    let aggregator = EnvelopeAggregator::new();

    c.bench_function("envelope", |b| {
        b.iter(|| black_box(aggregator.envelope(&table).len()))
    });

    c.bench_function("latest_reading", |b| {
        b.iter(|| black_box(aggregator.latest_reading(&table)))
    });
}

fn benchmark_rankings(c: &mut Criterion) {
    let table = create_test_table(30);
    let ranker = ExtremeEventRanker::new();
    let trend = VariabilityTrend::new();

    c.bench_function("extreme_events", |b| {
        b.iter(|| {
            let floods = ranker.rank(&table, EventKind::Flood);
            let droughts = ranker.rank(&table, EventKind::Drought);
            black_box(floods.len() + droughts.len())
        })
    });

    c.bench_function("variability_trend", |b| {
        b.iter(|| black_box(trend.compute(&table).len()))
    });
}

fn benchmark_frequency(c: &mut Criterion) {
    let table = create_test_table(30);

    c.bench_function("frequency_distribution", |b| {
        b.iter(|| black_box(FrequencyDistribution::compute(&table, WeightKind::Flood).total()))
    });
}

fn benchmark_decimal_normalization(c: &mut Criterion) {
    let cells = ["1.234", "1,5", "  -60,0272 ", "", "abc", "2990", "11,2"];

    c.bench_function("decimal_normalization", |b| {
        b.iter(|| {
            let parsed = cells.iter().filter_map(|cell| normalize_decimal(cell)).count();
            black_box(parsed)
        })
    });
}

fn benchmark_varying_table_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_parsing_by_size");
    let reader = StationTableReader::new();

    for &size in &[100, 1_000, 10_000] {
        let text = create_test_csv(size);
        group.bench_with_input(BenchmarkId::new("rows", size), &text, |b, text| {
            b.iter(|| {
                let table = reader
                    .parse_table(text, "14990000", Path::new("bench.csv"))
                    .unwrap();
                black_box(table.len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_envelope,
    benchmark_rankings,
    benchmark_frequency,
    benchmark_decimal_normalization,
    benchmark_varying_table_sizes
);
criterion_main!(benches);
