//! Criterion benchmarks for u-aco.
//!
//! Uses random Euclidean instances of increasing size to measure the cost
//! of tour construction and pheromone update.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_aco::aco::{AcoConfig, AcoRunner, HeuristicMatrix, PheromoneMatrix, TourConstructor};
use u_aco::tsp::{City, DistanceMatrix};

fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let cities: Vec<City> = (0..n)
        .map(|i| City::new(i, rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    DistanceMatrix::from_cities(&cities).expect("random instance is valid")
}

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_construct");

    for &n in &[14, 58, 200] {
        let d = random_instance(n, 42);
        let heuristic = HeuristicMatrix::new(&d, 3.0);
        let pheromone = PheromoneMatrix::new(n, 1.0);
        let constructor = TourConstructor::new(&heuristic, &pheromone, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &constructor, |b, ctor| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(ctor.construct(0, &mut rng)))
        });
    }
    group.finish();
}

fn bench_trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_trial");
    group.sample_size(10);

    for (n, ants, iters) in [(14usize, 20usize, 50usize), (58, 50, 20)] {
        let d = random_instance(n, 1);
        for elitist in [false, true] {
            let mut config = AcoConfig::default()
                .with_num_ants(ants)
                .with_total_iterations(iters)
                .with_seed(42);
            if elitist {
                config = config.with_elitist(5.0);
            }
            let label = if elitist { "elitist" } else { "standard" };
            group.bench_with_input(
                BenchmarkId::new(format!("{label}_a{ants}_i{iters}"), n),
                &(d.clone(), config),
                |b, (d, c)| {
                    b.iter(|| {
                        let result = AcoRunner::run(black_box(d), black_box(c));
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_construct, bench_trial);
criterion_main!(benches);
