//! Benchmarks for solvable board generation.
//!
//! # Benchmarks
//!
//! - **`generator_shuffle`**: Rejection-sampled Fisher–Yates boards for each stage
//!   size. Roughly half of all shuffles are unsolvable, so this measures the whole
//!   retry loop rather than a single shuffle.
//! - **`generator_excluding`**: The same generation with a set of previously completed
//!   layouts that must be skipped.
//! - **`scramble_walk`**: Random walks of blank moves away from the goal.
//!
//! # Test Data
//!
//! Uses three fixed seeds so every run measures the same boards.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{collections::HashSet, hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use tilerush_core::BoardSize;
use tilerush_generator::{BoardGenerator, BoardSeed, scramble_walk};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

const SIZES: [BoardSize; 3] = [BoardSize::THREE, BoardSize::FOUR, BoardSize::FIVE];

fn seeds() -> impl Iterator<Item = (usize, BoardSeed)> {
    SEEDS
        .into_iter()
        .map(|seed| BoardSeed::from_str(seed).unwrap())
        .enumerate()
}

fn bench_generator_shuffle(c: &mut Criterion) {
    let generator = BoardGenerator::new();

    for size in SIZES {
        for (i, seed) in seeds() {
            c.bench_with_input(
                BenchmarkId::new(format!("generator_shuffle/{size}"), format!("seed_{i}")),
                &seed,
                |b, seed| {
                    b.iter_batched(
                        || hint::black_box(*seed),
                        |seed| generator.generate_with_seed(size, seed, &HashSet::new()),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

fn bench_generator_excluding(c: &mut Criterion) {
    let generator = BoardGenerator::new();
    let excluded = (0..50)
        .map(|_| generator.generate(BoardSize::THREE).board.layout_id())
        .collect::<HashSet<_>>();

    for (i, seed) in seeds() {
        c.bench_with_input(
            BenchmarkId::new("generator_excluding", format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(BoardSize::THREE, seed, &excluded),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_scramble_walk(c: &mut Criterion) {
    for steps in [5, 20, 50] {
        for (i, seed) in seeds() {
            c.bench_with_input(
                BenchmarkId::new(format!("scramble_walk/{steps}"), format!("seed_{i}")),
                &seed,
                |b, seed| {
                    b.iter_batched(
                        || hint::black_box(*seed),
                        |seed| scramble_walk(BoardSize::FOUR, steps, seed),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(8));
    targets =
        bench_generator_shuffle,
        bench_generator_excluding,
        bench_scramble_walk
);
criterion_main!(benches);
