//! End-to-end regression tests for lumen-search.
//!
//! A planted pattern separates the two classes perfectly; the search must find
//! a shapelet achieving the full set entropy, and parallel scheduling must
//! agree with sequential scheduling.

use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lumen_search::{Parallelism, PruningMode, SearchConfig, SearchError, SearchResult};
use lumen_series::{ClassLabel, EarlyAbandon, LightCurve, SeriesId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const BUMP: [f64; 4] = [5.0, 5.0, 5.0, 5.0];

/// 12 curves of 40 samples with uniform noise in [0, 1). Even-indexed curves
/// carry the bump at a random offset and form the target class.
fn planted_dataset(seed: u64) -> (Vec<LightCurve>, HashSet<SeriesId>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut curves = Vec::new();
    let mut belongs = HashSet::new();
    for i in 0..12 {
        let mut values: Vec<f64> = (0..40).map(|_| rng.r#gen::<f64>()).collect();
        if i % 2 == 0 {
            let at = rng.gen_range(0..40 - BUMP.len());
            values[at..at + BUMP.len()].copy_from_slice(&BUMP);
            belongs.insert(SeriesId::new(i));
        }
        curves.push(LightCurve::regular(0.0, 1.0, values).expect("valid curve"));
    }
    (curves, belongs)
}

fn exhaustive(parallelism: Parallelism) -> SearchConfig {
    SearchConfig::new(3.0, 4.0, 1.0)
        .unwrap()
        .with_pruning(PruningMode::Disabled)
        .with_parallelism(parallelism)
}

// ---------------------------------------------------------------------------
// a) two_curve_scenario
// ---------------------------------------------------------------------------

#[test]
fn two_curve_scenario() {
    let times = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let a = LightCurve::new(times.clone(), vec![1.0, 1.0, 1.0, 5.0, 5.0]).unwrap();
    let b = LightCurve::new(times, vec![5.0, 5.0, 5.0, 1.0, 1.0]).unwrap();
    let belongs: HashSet<SeriesId> = [SeriesId::new(0)].into_iter().collect();

    let result = SearchConfig::new(2.0, 2.0, 1.0)
        .unwrap()
        .with_parallelism(Parallelism::Sequential)
        .fit(&[a, b], &belongs)
        .unwrap();

    assert_eq!(result.n_candidates, 6);
    assert!((result.set_entropy - 1.0).abs() < 1e-12);

    let best = result.best.expect("perfect separation exists");
    assert_eq!(best.key.series, SeriesId::new(0));
    assert_eq!(best.key.index, 0);
    assert_eq!(best.shapelet.values(), &[1.0, 1.0, 1.0]);
    assert_eq!(best.records[0].distance, 0.0);
    assert_eq!(best.records[1].distance, 16.0);
    assert!((best.split_point - 8.0).abs() < 1e-12);
    assert!((best.gain - 1.0).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// b) planted_pattern_is_found
// ---------------------------------------------------------------------------

#[test]
fn planted_pattern_is_found() {
    let (curves, belongs) = planted_dataset(42);
    let result = exhaustive(Parallelism::Sequential).fit(&curves, &belongs).unwrap();

    let best = result.best.as_ref().expect("planted pattern separates classes");
    assert!((best.gain - result.set_entropy).abs() < 1e-12);
    assert_eq!(result.n_pruned, 0);
    assert_eq!(result.n_candidates, 12 * (37 + 36));

    let classifier = result.classifier().unwrap();
    for (i, curve) in curves.iter().enumerate() {
        let expected = ClassLabel::from(belongs.contains(&SeriesId::new(i)));
        assert_eq!(classifier.classify(curve), expected, "curve {i}");
    }
}

// ---------------------------------------------------------------------------
// c) parallel_matches_sequential
// ---------------------------------------------------------------------------

#[test]
fn parallel_matches_sequential() {
    let (curves, belongs) = planted_dataset(7);
    let sequential = exhaustive(Parallelism::Sequential).fit(&curves, &belongs).unwrap();
    let parallel = exhaustive(Parallelism::Parallel).fit(&curves, &belongs).unwrap();

    assert_eq!(sequential.n_candidates, parallel.n_candidates);
    assert_eq!(sequential.best, parallel.best);
}

// ---------------------------------------------------------------------------
// d) early_abandon_does_not_change_result
// ---------------------------------------------------------------------------

#[test]
fn early_abandon_does_not_change_result() {
    let (curves, belongs) = planted_dataset(3);
    let fast = exhaustive(Parallelism::Sequential).fit(&curves, &belongs).unwrap();
    let slow = exhaustive(Parallelism::Sequential)
        .with_early_abandon(EarlyAbandon::Disabled)
        .fit(&curves, &belongs)
        .unwrap();
    assert_eq!(fast.best, slow.best);
}

// ---------------------------------------------------------------------------
// e) pruning_discards_candidates
// ---------------------------------------------------------------------------

#[test]
fn pruning_discards_candidates() {
    let (curves, belongs) = planted_dataset(42);
    let pruned = SearchConfig::new(3.0, 4.0, 1.0)
        .unwrap()
        .with_parallelism(Parallelism::Sequential)
        .fit(&curves, &belongs)
        .unwrap();
    let full = exhaustive(Parallelism::Sequential).fit(&curves, &belongs).unwrap();

    assert!(pruned.n_pruned > 0);
    assert!(pruned.n_pruned < pruned.n_candidates);
    assert_eq!(pruned.n_candidates, full.n_candidates);
    assert_eq!(pruned.best, full.best);
}

// ---------------------------------------------------------------------------
// f) pruning_keeps_the_winner_on_noisy_data
// ---------------------------------------------------------------------------

/// 10 short curves of small integer levels with random classes; rarely
/// separable, so the winning gain is usually below the set entropy.
fn noisy_dataset(seed: u64) -> (Vec<LightCurve>, HashSet<SeriesId>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut curves = Vec::new();
    let mut belongs = HashSet::new();
    for i in 0..10 {
        let values: Vec<f64> = (0..15).map(|_| f64::from(rng.gen_range(0..4_u8))).collect();
        curves.push(LightCurve::regular(0.0, 1.0, values).unwrap());
        if rng.gen_bool(0.5) {
            belongs.insert(SeriesId::new(i));
        }
    }
    (curves, belongs)
}

#[test]
fn pruning_keeps_the_winner_on_noisy_data() {
    let mut total_pruned = 0;
    for seed in 0..60 {
        let (curves, belongs) = noisy_dataset(seed);
        let base = SearchConfig::new(1.0, 3.0, 1.0)
            .unwrap()
            .with_parallelism(Parallelism::Sequential);
        let full = base
            .with_pruning(PruningMode::Disabled)
            .fit(&curves, &belongs)
            .unwrap();
        let pruned = base.fit(&curves, &belongs).unwrap();
        let pruned_parallel = base
            .with_parallelism(Parallelism::Parallel)
            .fit(&curves, &belongs)
            .unwrap();

        assert_eq!(pruned.best, full.best, "seed {seed}");
        assert_eq!(
            pruned_parallel.best.as_ref().map(|b| (b.key, b.gain)),
            full.best.as_ref().map(|b| (b.key, b.gain)),
            "seed {seed}"
        );
        total_pruned += pruned.n_pruned;
    }
    assert!(total_pruned > 0);
}

#[test]
fn heuristic_pruning_never_beats_the_full_search() {
    for seed in 0..20 {
        let (curves, belongs) = noisy_dataset(seed);
        let base = SearchConfig::new(1.0, 3.0, 1.0)
            .unwrap()
            .with_parallelism(Parallelism::Sequential);
        let full = base.with_pruning(PruningMode::Disabled).fit(&curves, &belongs).unwrap();
        let heuristic = base.with_pruning(PruningMode::Heuristic).fit(&curves, &belongs).unwrap();
        let gain = |r: &SearchResult| r.best.as_ref().map_or(0.0, |b| b.gain);
        assert!(gain(&heuristic) <= gain(&full), "seed {seed}");
        assert_eq!(heuristic.n_candidates, full.n_candidates);
    }
}

// ---------------------------------------------------------------------------
// g) degenerate_inputs
// ---------------------------------------------------------------------------

#[test]
fn empty_dataset_is_rejected() {
    let belongs: HashSet<SeriesId> = HashSet::new();
    let result = SearchConfig::new(1.0, 2.0, 1.0).unwrap().fit(&[], &belongs);
    assert!(matches!(result, Err(SearchError::EmptyDataset)));
}

#[test]
fn single_class_dataset_has_no_winner() {
    let (curves, _) = planted_dataset(1);
    let belongs: HashSet<SeriesId> = HashSet::new();
    let result = exhaustive(Parallelism::Parallel).fit(&curves, &belongs).unwrap();
    assert_eq!(result.set_entropy, 0.0);
    assert!(result.best.is_none());
    assert!(matches!(result.classifier(), Err(SearchError::NoShapelet)));
}

#[test]
fn durations_beyond_every_curve_yield_no_candidates() {
    let (curves, belongs) = planted_dataset(1);
    let result = SearchConfig::new(100.0, 200.0, 1.0)
        .unwrap()
        .fit(&curves, &belongs)
        .unwrap();
    assert_eq!(result.n_candidates, 0);
    assert!(result.best.is_none());
}
