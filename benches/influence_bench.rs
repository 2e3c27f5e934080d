//! Benchmarks for the influence game pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use influence_game::game::{build_payoff_matrix, HedgeConfig, HedgeSolver};
use influence_game::network::{build_random_connected_graph, compute_distances};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn network_benchmark(c: &mut Criterion) {
    c.bench_function("build_graph_100", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| build_random_connected_graph(black_box(100), black_box(0.05), &mut rng))
    });

    let mut rng = StdRng::seed_from_u64(42);
    let graph = build_random_connected_graph(100, 0.05, &mut rng).unwrap();
    c.bench_function("distances_100", |b| b.iter(|| compute_distances(black_box(&graph))));

    let distances = compute_distances(&graph).unwrap();
    c.bench_function("payoffs_100", |b| b.iter(|| build_payoff_matrix(black_box(&distances))));
}

fn solver_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let graph = build_random_connected_graph(100, 0.05, &mut rng).unwrap();
    let payoffs = build_payoff_matrix(&compute_distances(&graph).unwrap());

    c.bench_function("hedge_1000_iterations_100", |b| {
        b.iter(|| {
            let config = HedgeConfig::default().with_iterations(black_box(1_000));
            HedgeSolver::new(&payoffs, config).solve()
        })
    });

    c.bench_function("hedge_1000_iterations_100_parallel", |b| {
        b.iter(|| {
            let config = HedgeConfig::default()
                .with_iterations(black_box(1_000))
                .with_parallel(true);
            HedgeSolver::new(&payoffs, config).solve()
        })
    });
}

criterion_group!(benches, network_benchmark, solver_benchmark);
criterion_main!(benches);
