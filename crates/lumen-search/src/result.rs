//! Result types for shapelet search.

use lumen_series::{DistanceEvaluator, DistanceRecord, Shapelet};
use lumen_split::ClassCounts;

use crate::classifier::ShapeletClassifier;
use crate::context::CandidateKey;
use crate::error::SearchError;

/// The winning candidate and its split.
#[derive(Debug, Clone, PartialEq)]
pub struct BestShapelet {
    /// Position of the candidate in enumeration order.
    pub key: CandidateKey,
    /// The shapelet values and origin.
    pub shapelet: Shapelet,
    /// Distance threshold that maximised information gain.
    pub split_point: f64,
    /// Information gain at `split_point`.
    pub gain: f64,
    /// Distance record for every series, in series order.
    pub records: Vec<DistanceRecord>,
}

/// Outcome of a full shapelet search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best candidate, or `None` if no candidate achieved positive gain.
    pub best: Option<BestShapelet>,
    /// Number of candidates generated across all series.
    pub n_candidates: usize,
    /// Number of candidates abandoned by the pruning bound.
    pub n_pruned: usize,
    /// Class tallies of the whole dataset.
    pub class_counts: ClassCounts,
    /// Entropy of the whole dataset's class proportions.
    pub set_entropy: f64,
    pub(crate) evaluator: DistanceEvaluator,
}

impl SearchResult {
    /// Return the distance evaluator the search scored with.
    #[must_use]
    pub fn evaluator(&self) -> DistanceEvaluator {
        self.evaluator
    }

    /// Build the minimum-distance classifier for the winning shapelet.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoShapelet`] if no candidate achieved positive gain.
    pub fn classifier(&self) -> Result<ShapeletClassifier, SearchError> {
        let best = self.best.as_ref().ok_or(SearchError::NoShapelet)?;
        Ok(ShapeletClassifier::from_best(best, self.evaluator))
    }
}
