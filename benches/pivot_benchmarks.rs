use criterion::{black_box, criterion_group, criterion_main, Criterion};
use h2_dashboard::{align_all, Observation, Quantity, SeriesTable};

fn synthetic_observations(hours: i64, scenarios: &[&str]) -> Vec<Observation> {
    let mut observations = Vec::new();
    for hour in 0..hours {
        for (idx, scenario) in scenarios.iter().enumerate() {
            let value = ((hour + idx as i64) % 24) as f64 * 1.5;
            observations.push(Observation::new(hour, *scenario, value));
        }
    }
    observations
}

fn benchmark_pivot(c: &mut Criterion) {
    // One simulated year, four scenarios
    let observations = synthetic_observations(8760, &["S1", "S2", "S3", "S4"]);

    c.bench_function("pivot_year_4_scenarios", |b| {
        b.iter(|| {
            let table = SeriesTable::pivot(Quantity::Pv, black_box(&observations));
            black_box(table).unwrap()
        });
    });
}

fn benchmark_align(c: &mut Criterion) {
    let scenarios = ["S1", "S2", "S3", "S4"];
    let full = synthetic_observations(8760, &scenarios);
    // One table misses the first week so alignment has work to do
    let short: Vec<Observation> = synthetic_observations(8760, &scenarios)
        .into_iter()
        .filter(|o| o.hour >= 168)
        .collect();

    c.bench_function("align_seven_tables", |b| {
        b.iter(|| {
            let mut tables: Vec<SeriesTable> = Quantity::ALL
                .iter()
                .map(|&q| {
                    let observations = if q == Quantity::Soc { &short } else { &full };
                    SeriesTable::pivot(q, observations).unwrap()
                })
                .collect();
            align_all(black_box(&mut tables)).unwrap();
            black_box(tables)
        });
    });
}

criterion_group!(benches, benchmark_pivot, benchmark_align);
criterion_main!(benches);
