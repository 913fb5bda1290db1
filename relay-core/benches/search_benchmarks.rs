//! Criterion benchmarks for the A* path search.
//!
//! Measures search time across candidate set sizes on the complete graph and
//! on the five-nearest proximity graph.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package relay-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use relay_core::test_support::waypoint;
use relay_core::{GeneratorConfig, PathFinder, SearchConfig, Topology, generate_candidates};

/// Candidate set sizes to benchmark.
const SET_SIZES: &[usize] = &[10, 100, 400];

/// Fixed seed so every run searches the same sets.
const BENCHMARK_SEED: u64 = 0x5EED;

fn bench_search(c: &mut Criterion) {
    let start = waypoint("Start", 26.9124, 75.7873);
    let goal = waypoint("Destination", 26.95, 75.825);
    let mut group = c.benchmark_group("find_path");

    for topology in [Topology::Complete, Topology::Nearest { k: 5 }] {
        let Ok(finder) = PathFinder::new(SearchConfig {
            topology,
            ..SearchConfig::with_threshold(0.01)
        }) else {
            continue;
        };
        for &size in SET_SIZES {
            let config = GeneratorConfig {
                count: size,
                ..GeneratorConfig::default()
            };
            let mut rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
            let Ok(candidates) = generate_candidates(&start, &goal, &config, &mut rng) else {
                continue;
            };

            #[expect(
                clippy::as_conversions,
                reason = "Safe conversion for small set sizes"
            )]
            let throughput_size = size as u64;
            group.throughput(Throughput::Elements(throughput_size));
            group.bench_with_input(
                BenchmarkId::new(topology.to_string(), size),
                &candidates,
                |b, candidates| {
                    b.iter_batched(
                        || candidates.clone(),
                        |mut set| finder.find_path(&start, &goal, &mut set),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
