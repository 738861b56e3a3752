//! Criterion benchmarks for the walk engine and the session driver.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qwalk::{SessionBuilder, SpinAmplitudes, WalkEngine};

fn quantum_step_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("quantum_step");

    for sites in [100, 500, 2000] {
        let engine = WalkEngine::with_sites(sites).expect("valid lattice");
        let state = engine
            .evolve_quantum(
                engine.initialize_quantum(sites / 2, SpinAmplitudes::new(1.0, 0.0, 0.0, 1.0)).expect("valid start"),
                sites / 4,
            )
            .expect("evolves");

        group.bench_with_input(BenchmarkId::new("step", sites), &sites, |bencher, _| {
            bencher.iter_batched(
                || state.clone(),
                |state| black_box(engine.step_quantum(state).expect("step")),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn classical_step_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("classical_step");

    for sites in [100, 500, 2000] {
        let engine = WalkEngine::with_sites(sites).expect("valid lattice");
        let dist = engine
            .evolve_classical(engine.initialize_classical(sites / 2).expect("valid start"), sites / 4)
            .expect("evolves");

        group.bench_with_input(BenchmarkId::new("step", sites), &sites, |bencher, _| {
            bencher.iter_batched(
                || dist.clone(),
                |dist| black_box(engine.step_classical(dist).expect("step")),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn session_tick_benchmark(criterion: &mut Criterion) {
    criterion.bench_function("session_tick_500", |bencher| {
        let mut session = SessionBuilder::new().build().expect("default session");
        session.start();
        bencher.iter(|| {
            session.tick().expect("tick");
            black_box(session.frame().expect("frame"));
        });
    });
}

criterion_group!(benches, quantum_step_benchmark, classical_step_benchmark, session_tick_benchmark);
criterion_main!(benches);
