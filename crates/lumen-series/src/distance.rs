//! Nearest-subsequence distance between a shapelet and a light curve.

use tracing::instrument;

use crate::error::SeriesError;
use crate::gap::GapModel;
use crate::record::{ClassMembership, DistanceRecord, SeriesId};
use crate::series::LightCurve;
use crate::shapelet::Shapelet;

/// Whether a partial sum may be abandoned once it can no longer win.
///
/// Abandoning never changes the result: an abandoned offset is already at
/// least as far as the best completed one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EarlyAbandon {
    /// Stop summing an offset as soon as the running sum reaches the best so far.
    #[default]
    Enabled,
    /// Sum every offset in full. Reference behaviour for verification.
    Disabled,
}

/// Computes the minimum sum-of-squared-differences between a shapelet and every
/// gap-free, equal-duration window of a light curve.
///
/// Immutable, thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceEvaluator {
    gap: GapModel,
    abandon: EarlyAbandon,
}

impl DistanceEvaluator {
    /// Create an evaluator with early abandonment enabled.
    #[must_use]
    pub fn new(gap: GapModel) -> Self {
        Self {
            gap,
            abandon: EarlyAbandon::Enabled,
        }
    }

    /// Set the early abandonment mode.
    #[must_use]
    pub fn with_early_abandon(mut self, abandon: EarlyAbandon) -> Self {
        self.abandon = abandon;
        self
    }

    /// Return the gap model used to validate alignments.
    #[must_use]
    pub fn gap(&self) -> GapModel {
        self.gap
    }

    /// Return the early abandonment mode.
    #[must_use]
    pub fn early_abandon(&self) -> EarlyAbandon {
        self.abandon
    }

    /// Return the minimum distance over all valid alignments of `shapelet` in `series`.
    ///
    /// An offset is valid only if its window spans exactly the shapelet's
    /// duration. Returns `f64::INFINITY` when no offset is valid, including
    /// when the shapelet is longer than the series.
    #[must_use]
    pub fn nearest(&self, series: &LightCurve, shapelet: &Shapelet) -> f64 {
        nearest_subsequence(
            series.times(),
            series.values(),
            shapelet.values(),
            self.gap,
            self.abandon,
        )
    }

    /// Measure `shapelet` against `series` and label the result by class membership.
    #[must_use]
    pub fn evaluate<M>(
        &self,
        series_id: SeriesId,
        series: &LightCurve,
        shapelet: &Shapelet,
        membership: &M,
    ) -> DistanceRecord
    where
        M: ClassMembership + ?Sized,
    {
        DistanceRecord::new(
            series_id,
            self.nearest(series, shapelet),
            membership.label(series_id),
        )
    }
}

/// Sliding-window minimum with optional early abandoning.
///
/// `best` starts at infinity; an offset whose running sum reaches `best`
/// cannot improve it and is skipped when abandoning is enabled.
fn nearest_subsequence(
    times: &[f64],
    values: &[f64],
    shapelet: &[f64],
    gap: GapModel,
    abandon: EarlyAbandon,
) -> f64 {
    let n = values.len();
    let m = shapelet.len();
    let mut best = f64::INFINITY;
    if m == 0 || m > n {
        return best;
    }

    'offsets: for start in 0..=(n - m) {
        if !gap.is_contiguous(times, start, start + m - 1) {
            continue;
        }
        let mut sum = 0.0;
        for (&v, &s) in values[start..start + m].iter().zip(shapelet) {
            let diff = v - s;
            sum += diff * diff;
            if abandon == EarlyAbandon::Enabled && sum >= best {
                continue 'offsets;
            }
        }
        best = best.min(sum);
    }
    best
}

/// Compute the [`DistanceRecord`] of `shapelet` against one light curve.
///
/// The record's label is [`ClassLabel::Belongs`](crate::ClassLabel::Belongs)
/// when `belongs` contains `series_id`. Uses early abandonment and the default
/// gap tolerance of `time_res / 2`.
///
/// # Errors
///
/// Returns [`SeriesError::InvalidResolution`] if `time_res` is not finite and positive.
#[instrument(skip(series, shapelet, belongs), fields(n = series.len(), m = shapelet.len()))]
pub fn evaluate_distance<M>(
    series_id: SeriesId,
    series: &LightCurve,
    shapelet: &Shapelet,
    time_res: f64,
    belongs: &M,
) -> Result<DistanceRecord, SeriesError>
where
    M: ClassMembership + ?Sized,
{
    let evaluator = DistanceEvaluator::new(GapModel::new(time_res)?);
    Ok(evaluator.evaluate(series_id, series, shapelet, belongs))
}
