//! Configuration builder for shapelet search.

use lumen_series::{
    ClassMembership, DistanceEvaluator, EarlyAbandon, GapModel, LightCurve,
};

use crate::error::SearchError;
use crate::result::SearchResult;

/// Whether partially evaluated candidates may be abandoned early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PruningMode {
    /// Abandon a candidate once no completion of its distances could beat
    /// the incumbent. Returns the same winner as [`PruningMode::Disabled`].
    #[default]
    Enabled,
    /// Abandon using a single best-case completion tested at the partial best
    /// split. Often prunes sooner, but may discard the candidate that would have won.
    Heuristic,
    /// Evaluate every candidate against every series.
    Disabled,
}

/// How candidates are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Score candidates one after another in enumeration order.
    Sequential,
    /// Score candidates concurrently on the rayon thread pool.
    #[default]
    Parallel,
}

/// Configuration for shapelet search.
///
/// Construct via [`SearchConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter       | Default                  |
/// |-----------------|--------------------------|
/// | `gap_tolerance` | `time_res / 2`           |
/// | `early_abandon` | `EarlyAbandon::Enabled`  |
/// | `pruning`       | `PruningMode::Enabled`   |
/// | `parallelism`   | `Parallelism::Parallel`  |
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub(crate) min_duration: f64,
    pub(crate) max_duration: f64,
    pub(crate) gap: GapModel,
    pub(crate) early_abandon: EarlyAbandon,
    pub(crate) pruning: PruningMode,
    pub(crate) parallelism: Parallelism,
}

impl SearchConfig {
    /// Create a search over shapelets spanning `[min_duration, max_duration]`
    /// seconds of light curves sampled every `time_res` seconds.
    ///
    /// `min_duration > max_duration` is accepted and yields no candidates.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SearchError::Series`] | `time_res` is not finite and positive, or a duration is negative or non-finite |
    pub fn new(min_duration: f64, max_duration: f64, time_res: f64) -> Result<Self, SearchError> {
        let gap = GapModel::new(time_res)?;
        gap.steps(min_duration)?;
        gap.steps(max_duration)?;
        Ok(Self {
            min_duration,
            max_duration,
            gap,
            early_abandon: EarlyAbandon::Enabled,
            pruning: PruningMode::Enabled,
            parallelism: Parallelism::Parallel,
        })
    }

    /// Set the absolute gap tolerance in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Series`] unless `0 <= tolerance <= time_res / 2`.
    pub fn with_gap_tolerance(mut self, tolerance: f64) -> Result<Self, SearchError> {
        self.gap = self.gap.with_tolerance(tolerance)?;
        Ok(self)
    }

    /// Set the early abandonment mode of the distance evaluator.
    #[must_use]
    pub fn with_early_abandon(mut self, early_abandon: EarlyAbandon) -> Self {
        self.early_abandon = early_abandon;
        self
    }

    /// Select how, or whether, partially evaluated candidates are pruned.
    #[must_use]
    pub fn with_pruning(mut self, pruning: PruningMode) -> Self {
        self.pruning = pruning;
        self
    }

    /// Set how candidates are scheduled.
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Return the gap model shared by generation and distance evaluation.
    #[must_use]
    pub fn gap(&self) -> GapModel {
        self.gap
    }

    /// Return the distance evaluator this configuration scores with.
    #[must_use]
    pub fn evaluator(&self) -> DistanceEvaluator {
        DistanceEvaluator::new(self.gap).with_early_abandon(self.early_abandon)
    }

    /// Run the search over `curves`; series `i` is identified as `SeriesId::new(i)`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SearchError::EmptyDataset`] | `curves` is empty |
    pub fn fit<M>(&self, curves: &[LightCurve], membership: &M) -> Result<SearchResult, SearchError>
    where
        M: ClassMembership + Sync + ?Sized,
    {
        crate::search::run(self, curves, membership)
    }
}
