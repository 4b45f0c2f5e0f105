//! Exhaustive threshold search over a candidate's distance records.

use lumen_series::DistanceRecord;

use crate::entropy::ClassCounts;
use crate::gain::{check_split_point, gain_from_counts};

/// Best threshold found for one candidate and the gain it achieves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOutcome {
    /// Distance threshold. `0` when no split improves on zero gain.
    pub split_point: f64,
    /// Information gain at `split_point`.
    pub gain: f64,
}

impl SplitOutcome {
    /// "No useful split found": split 0, gain 0.
    pub const NONE: Self = Self {
        split_point: 0.0,
        gain: 0.0,
    };

    /// Return true for the [`SplitOutcome::NONE`] sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.split_point == 0.0
    }
}

/// Find the distance threshold that maximises information gain.
///
/// Candidate thresholds are the midpoints between consecutive distinct
/// distances in ascending order. Thresholds that cannot partition the set are
/// skipped. The search starts from [`SplitOutcome::NONE`] and only a strictly
/// larger gain replaces the incumbent, so ties keep the lowest threshold and a
/// set with no positive-gain split returns the sentinel.
///
/// `records` is left untouched; sorting happens on a private copy.
#[must_use]
pub fn best_split(records: &[DistanceRecord], set_entropy: f64) -> SplitOutcome {
    let mut sorted = records.to_vec();
    sorted.sort_unstable_by(|a, b| a.distance.total_cmp(&b.distance));
    best_split_sorted(&sorted, set_entropy)
}

/// [`best_split`] over records already in ascending distance order.
///
/// Callers that grow a record set one series at a time keep it sorted by
/// insertion and skip the per-call sort.
#[must_use]
pub fn best_split_sorted(sorted: &[DistanceRecord], set_entropy: f64) -> SplitOutcome {
    debug_assert!(sorted.is_sorted_by(|a, b| a.distance.total_cmp(&b.distance).is_le()));

    // belongs_prefix[i] = number of class-1 records among the first i sorted.
    let mut belongs_prefix = Vec::with_capacity(sorted.len() + 1);
    belongs_prefix.push(0usize);
    for record in sorted {
        let last = belongs_prefix[belongs_prefix.len() - 1];
        belongs_prefix.push(last + usize::from(record.label.belongs()));
    }
    let total = ClassCounts::from_records(sorted);

    let mut best = SplitOutcome::NONE;
    for pair in sorted.windows(2) {
        let (lo, hi) = (pair[0].distance, pair[1].distance);
        if lo == hi {
            continue;
        }
        let split_point = (lo + hi) / 2.0;
        if check_split_point(split_point).is_err() {
            continue;
        }

        // Same partition information_gain would build: distance < split below.
        let n_below = sorted.partition_point(|r| r.distance < split_point);
        let below = ClassCounts::new(belongs_prefix[n_below], n_below - belongs_prefix[n_below]);
        let above = ClassCounts::new(total.belongs - below.belongs, total.other - below.other);

        if let Ok(gain) = gain_from_counts(set_entropy, split_point, below, above)
            && gain > best.gain
        {
            best = SplitOutcome { split_point, gain };
        }
    }
    best
}
