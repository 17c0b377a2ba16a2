//! Benchmark correction, reconciliation and key derivation on synthetic tables
//!
//! Run with: cargo bench --bench reconcile_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use crimekey::pipeline::{
    build_key, correct_coordinates, reconcile, round_coordinates, CorrectionTable, JoinSpec,
    ADDRESS_CORRECTIONS,
};

const DISTRICTS: &[&str] = &["MISSION", "NORTHERN", "SOUTHERN", "BAYVIEW", "TENDERLOIN"];
const CATEGORIES: &[&str] = &["ASSAULT", "LARCENY THEFT", "WARRANTS", "VANDALISM", "OTHER OFFENSES"];

/// Generate a truth table and a test table drawn from it.
///
/// Roughly 2% of rows sit at the sentinel on a curated address.
fn generate_tables(n_rows: usize, seed: u64) -> (DataFrame, DataFrame) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let mut timestamps = Vec::with_capacity(n_rows);
    let mut districts = Vec::with_capacity(n_rows);
    let mut categories = Vec::with_capacity(n_rows);
    let mut addresses = Vec::with_capacity(n_rows);
    let mut xs = Vec::with_capacity(n_rows);
    let mut ys = Vec::with_capacity(n_rows);

    for _ in 0..n_rows {
        // whole minutes, in microseconds
        timestamps.push(rng.gen_range(0i64..500_000) * 60_000_000);
        districts.push(*DISTRICTS.choose(&mut rng).unwrap());
        categories.push(*CATEGORIES.choose(&mut rng).unwrap());
        if rng.gen::<f64>() < 0.02 {
            addresses.push(ADDRESS_CORRECTIONS.choose(&mut rng).unwrap().address.to_string());
            xs.push(-120.5);
            ys.push(90.0);
        } else {
            addresses.push(format!("{}00 Block of MARKET ST", rng.gen_range(1..30)));
            xs.push(-122.5 + rng.gen::<f64>() * 0.15);
            ys.push(37.70 + rng.gen::<f64>() * 0.11);
        }
    }

    let dates = Column::new("Dates".into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))
        .expect("Failed to cast Dates");
    let ids: Vec<i64> = (0..n_rows as i64).collect();

    let truth = DataFrame::new(vec![
        dates.clone(),
        Column::new("Category".into(), categories),
        Column::new("PdDistrict".into(), districts.clone()),
        Column::new("Address".into(), addresses.clone()),
        Column::new("X".into(), xs.clone()),
        Column::new("Y".into(), ys.clone()),
        Column::new("PdId".into(), ids.clone()),
    ])
    .expect("Failed to create truth DataFrame");

    let test = DataFrame::new(vec![
        Column::new("Id".into(), ids),
        dates,
        Column::new("PdDistrict".into(), districts),
        Column::new("Address".into(), addresses),
        Column::new("X".into(), xs),
        Column::new("Y".into(), ys),
    ])
    .expect("Failed to create test DataFrame");

    (truth, test)
}

/// Benchmark sentinel correction plus rounding for varying table sizes
fn benchmark_correction(c: &mut Criterion) {
    let mut group = c.benchmark_group("correction");
    let table = CorrectionTable::curated();

    for n_rows in [10_000usize, 100_000] {
        let (truth, _) = generate_tables(n_rows, 42);
        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &truth, |b, truth| {
            b.iter(|| {
                let mut df = truth.clone();
                correct_coordinates(&mut df, &table).unwrap();
                round_coordinates(&mut df).unwrap();
                black_box(df)
            })
        });
    }

    group.finish();
}

/// Benchmark the test ↔ truth join followed by key derivation
fn benchmark_reconcile_and_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile_and_key");
    let table = CorrectionTable::curated();

    for n_rows in [10_000usize, 100_000] {
        let (mut truth, mut test) = generate_tables(n_rows, 7);
        for df in [&mut truth, &mut test] {
            correct_coordinates(df, &table).unwrap();
            round_coordinates(df).unwrap();
        }

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_rows),
            &(truth, test),
            |b, (truth, test)| {
                b.iter(|| {
                    let reconciled = reconcile(test, truth, &JoinSpec::test()).unwrap();
                    black_box(build_key(&reconciled.merged).unwrap())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_correction, benchmark_reconcile_and_key);
criterion_main!(benches);
