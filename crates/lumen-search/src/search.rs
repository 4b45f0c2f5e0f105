//! Candidate enumeration, scoring, and pruning.

use rayon::iter::{ParallelBridge, ParallelIterator};
use tracing::{debug, info, instrument};

use lumen_series::{
    ClassMembership, DistanceEvaluator, DistanceRecord, LightCurve, SeriesId, Shapelet,
    ShapeletGenerator,
};
use lumen_split::{
    ClassCounts, SplitOutcome, best_split, best_split_sorted, gain_upper_bound, should_prune,
};

use crate::config::{Parallelism, PruningMode, SearchConfig};
use crate::context::{CandidateKey, SearchContext};
use crate::error::SearchError;
use crate::result::{BestShapelet, SearchResult};

/// A bound this close to the incumbent counts as a tie and is not pruned.
const BOUND_SLACK: f64 = 1e-12;

/// What happened to one candidate.
#[derive(Debug)]
pub(crate) enum CandidateOutcome {
    /// Abandoned by the pruning bound after `evaluated` series.
    Pruned { evaluated: usize },
    /// Evaluated against every series.
    Scored {
        split: SplitOutcome,
        records: Vec<DistanceRecord>,
    },
}

/// Read-only state shared by every candidate of one search.
struct Scorer<'a, M: ?Sized> {
    curves: &'a [LightCurve],
    membership: &'a M,
    evaluator: DistanceEvaluator,
    pruning: PruningMode,
    totals: ClassCounts,
    set_entropy: f64,
}

impl<M> Scorer<'_, M>
where
    M: ClassMembership + ?Sized,
{
    /// Evaluate `shapelet` series by series, abandoning as soon as pruning allows.
    fn score(&self, shapelet: &Shapelet, ctx: &SearchContext) -> CandidateOutcome {
        let n = self.curves.len();
        let mut records = Vec::with_capacity(n);
        // The same records in ascending distance order, grown by insertion.
        let mut sorted: Vec<DistanceRecord> = Vec::with_capacity(n);
        for (i, curve) in self.curves.iter().enumerate() {
            let record = self
                .evaluator
                .evaluate(SeriesId::new(i), curve, shapelet, self.membership);
            records.push(record);
            if self.pruning == PruningMode::Disabled {
                continue;
            }
            let at = sorted.partition_point(|r| r.distance.total_cmp(&record.distance).is_le());
            sorted.insert(at, record);

            if records.len() == n {
                continue;
            }
            let incumbent = ctx.incumbent_gain();
            if incumbent > 0.0 && self.prunable(&sorted, incumbent) {
                return CandidateOutcome::Pruned {
                    evaluated: records.len(),
                };
            }
        }
        let split = if self.pruning == PruningMode::Disabled {
            best_split(&records, self.set_entropy)
        } else {
            best_split_sorted(&sorted, self.set_entropy)
        };
        CandidateOutcome::Scored { split, records }
    }

    /// Whether a candidate with these (sorted) partial records can be dropped.
    fn prunable(&self, sorted: &[DistanceRecord], incumbent: f64) -> bool {
        match self.pruning {
            PruningMode::Disabled => false,
            PruningMode::Enabled => {
                let bound = gain_upper_bound(
                    sorted,
                    self.set_entropy,
                    self.totals.belongs,
                    self.totals.other,
                );
                bound + BOUND_SLACK < incumbent
            }
            PruningMode::Heuristic => {
                let partial = best_split_sorted(sorted, self.set_entropy);
                !partial.is_none()
                    && should_prune(
                        sorted,
                        partial.split_point,
                        self.set_entropy,
                        incumbent,
                        self.totals.belongs,
                        self.totals.other,
                    )
            }
        }
    }

    /// Score one candidate and offer it to the incumbent once fully evaluated.
    fn visit(&self, key: CandidateKey, shapelet: Shapelet, ctx: &SearchContext) {
        ctx.record_candidate();
        match self.score(&shapelet, ctx) {
            CandidateOutcome::Pruned { evaluated } => {
                ctx.record_pruned();
                debug!(?key, evaluated, "candidate pruned");
            }
            CandidateOutcome::Scored { split, records } => {
                debug!(?key, gain = split.gain, split = split.split_point, "candidate scored");
                if split.is_none() {
                    return;
                }
                let improved = ctx.offer(BestShapelet {
                    key,
                    shapelet,
                    split_point: split.split_point,
                    gain: split.gain,
                    records,
                });
                if improved {
                    debug!(?key, gain = split.gain, "new incumbent");
                }
            }
        }
    }
}

/// Run the full search described by `config`.
#[instrument(skip_all, fields(n_series = curves.len(), parallelism = ?config.parallelism))]
pub(crate) fn run<M>(
    config: &SearchConfig,
    curves: &[LightCurve],
    membership: &M,
) -> Result<SearchResult, SearchError>
where
    M: ClassMembership + Sync + ?Sized,
{
    if curves.is_empty() {
        return Err(SearchError::EmptyDataset);
    }

    let mut totals = ClassCounts::default();
    for i in 0..curves.len() {
        totals.add(membership.label(SeriesId::new(i)));
    }
    let set_entropy = totals.entropy();

    let generators = curves
        .iter()
        .enumerate()
        .map(|(i, curve)| {
            ShapeletGenerator::new(
                curve,
                SeriesId::new(i),
                config.min_duration,
                config.max_duration,
                config.gap,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        n_series = curves.len(),
        n_belongs = totals.belongs,
        n_other = totals.other,
        set_entropy,
        min_duration = config.min_duration,
        max_duration = config.max_duration,
        "starting shapelet search"
    );

    let scorer = Scorer {
        curves,
        membership,
        evaluator: config.evaluator(),
        pruning: config.pruning,
        totals,
        set_entropy,
    };
    let ctx = SearchContext::new();

    let candidates = generators.into_iter().flat_map(|generator| {
        let series = generator.series_id();
        generator
            .enumerate()
            .map(move |(index, shapelet)| (CandidateKey { series, index }, shapelet))
    });

    match config.parallelism {
        Parallelism::Sequential => {
            candidates.for_each(|(key, shapelet)| scorer.visit(key, shapelet, &ctx));
        }
        Parallelism::Parallel => {
            candidates
                .par_bridge()
                .for_each(|(key, shapelet)| scorer.visit(key, shapelet, &ctx));
        }
    }

    let n_candidates = ctx.n_candidates();
    let n_pruned = ctx.n_pruned();
    let best = ctx.into_best();

    info!(
        n_candidates,
        n_pruned,
        best_gain = best.as_ref().map_or(0.0, |b| b.gain),
        "shapelet search complete"
    );

    Ok(SearchResult {
        best,
        n_candidates,
        n_pruned,
        class_counts: totals,
        set_entropy,
        evaluator: scorer.evaluator,
    })
}
