use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swissmeteo::{aggregate, GlobalPolicy, StationSeries, TimeSeries};

fn hourly_station(code: &str, weight: f64, offset: f64) -> StationSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let columns = vec!["air_temperature".to_string(), "rainfall".to_string()];
    let rows = (0..24 * 365).map(|h| {
        let value = offset + (h % 24) as f64;
        (start + Duration::hours(h), vec![Some(value), (h % 3 == 0).then_some(0.1)])
    });
    StationSeries {
        station_code: code.to_string(),
        weight,
        series: TimeSeries::from_rows(columns, rows),
    }
}

fn bench_aggregate(c: &mut Criterion) {
    let stations: Vec<StationSeries> = (0..22)
        .map(|i| hourly_station(&format!("S{i:02}"), 1.0 / 22.0, i as f64))
        .collect();

    c.bench_function("aggregate_partial_sum", |b| {
        b.iter(|| aggregate(black_box(&stations), true, GlobalPolicy::PartialSum))
    });
    c.bench_function("aggregate_renormalized", |b| {
        b.iter(|| aggregate(black_box(&stations), true, GlobalPolicy::Renormalized))
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
