//! Criterion benchmarks for lumen-search: full search under each pruning mode.

use std::collections::HashSet;

use criterion::{Criterion, criterion_group, criterion_main};

use lumen_search::{Parallelism, PruningMode, SearchConfig};
use lumen_series::{LightCurve, SeriesId};

fn make_dataset(n_series: usize, len: usize) -> (Vec<LightCurve>, HashSet<SeriesId>) {
    let mut curves = Vec::with_capacity(n_series);
    let mut belongs = HashSet::new();
    for s in 0..n_series {
        let phase = s as f64 * 0.7;
        let mut values: Vec<f64> = (0..len).map(|i| (i as f64 * 0.2 + phase).sin()).collect();
        if s % 2 == 0 {
            let at = (s * 7) % (len - 8);
            for v in &mut values[at..at + 8] {
                *v += 3.0;
            }
            belongs.insert(SeriesId::new(s));
        }
        curves.push(LightCurve::regular(0.0, 1.0, values).unwrap());
    }
    (curves, belongs)
}

fn bench_search(c: &mut Criterion) {
    let (curves, belongs) = make_dataset(20, 128);
    let mut group = c.benchmark_group("shapelet_search_20x128");
    group.sample_size(10);

    for (pruning, label) in [
        (PruningMode::Enabled, "pruned"),
        (PruningMode::Heuristic, "heuristic"),
        (PruningMode::Disabled, "exhaustive"),
    ] {
        let config = SearchConfig::new(6.0, 10.0, 1.0)
            .unwrap()
            .with_pruning(pruning)
            .with_parallelism(Parallelism::Parallel);
        group.bench_function(label, |b| {
            b.iter(|| config.fit(&curves, &belongs).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
