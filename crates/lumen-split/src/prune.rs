//! Optimistic entropy pruning for partially evaluated candidates.
//!
//! [`gain_upper_bound`] is a true bound over every completion and is what
//! the search prunes with by default. [`should_prune`] completes the partial
//! set one fixed way and tests a single threshold; it is faster to reason
//! about but can discard a candidate that would have won.

use std::iter::repeat_n;

use lumen_series::{ClassLabel, DistanceRecord, SeriesId};

use crate::entropy::ClassCounts;
use crate::gain::information_gain;

/// Placeholder id for synthetic records standing in for unevaluated series.
const UNEVALUATED: SeriesId = SeriesId::new(usize::MAX);

/// Decide whether a partially evaluated candidate can be discarded.
///
/// Completes `partial` with the best case for the remaining series: every
/// unevaluated class-1 series at distance 0 and every unevaluated class-0
/// series at one past the largest distance seen so far (0 when nothing has
/// been seen). The candidate is prunable if the gain of that completion at
/// `best_split` is invalid or strictly below `incumbent_gain`; a tie is not
/// pruned.
///
/// Works on a scratch copy; `partial` is not modified.
#[must_use]
pub fn should_prune(
    partial: &[DistanceRecord],
    best_split: f64,
    set_entropy: f64,
    incumbent_gain: f64,
    total_belongs: usize,
    total_other: usize,
) -> bool {
    let seen = ClassCounts::from_records(partial);
    let missing_belongs = total_belongs.saturating_sub(seen.belongs);
    let missing_other = total_other.saturating_sub(seen.other);
    let far = partial.iter().map(|r| r.distance).fold(0.0, f64::max) + 1.0;

    let mut completed = Vec::with_capacity(partial.len() + missing_belongs + missing_other);
    completed.extend_from_slice(partial);
    completed.extend(repeat_n(
        DistanceRecord::new(UNEVALUATED, 0.0, ClassLabel::Belongs),
        missing_belongs,
    ));
    completed.extend(repeat_n(
        DistanceRecord::new(UNEVALUATED, far, ClassLabel::Other),
        missing_other,
    ));

    match information_gain(&completed, set_entropy, best_split) {
        Ok(gain) => gain < incumbent_gain,
        Err(_) => true,
    }
}

/// Largest information gain any completion of a partial record set can reach.
///
/// `sorted` holds the records evaluated so far in ascending distance order.
/// Whatever distances the remaining series turn out to have, the final
/// threshold puts some prefix of `sorted` below it, ending between two
/// distinct distances. For a fixed prefix the weighted child entropy is
/// concave in how many unevaluated records of each class join the lower side,
/// so the gain peaks with each class wholly on one side. The bound is the maximum over every prefix and those four
/// placements.
///
/// Empty sides count as zero entropy, so the bound never exceeds
/// `set_entropy`. Returns 0 when there is nothing to split.
#[must_use]
pub fn gain_upper_bound(
    sorted: &[DistanceRecord],
    set_entropy: f64,
    total_belongs: usize,
    total_other: usize,
) -> f64 {
    let seen = ClassCounts::from_records(sorted);
    let missing = ClassCounts::new(
        total_belongs.saturating_sub(seen.belongs),
        total_other.saturating_sub(seen.other),
    );
    let total = ClassCounts::new(seen.belongs + missing.belongs, seen.other + missing.other);
    if total.total() == 0 {
        return 0.0;
    }

    let placements = [
        (0, 0),
        (missing.belongs, 0),
        (0, missing.other),
        (missing.belongs, missing.other),
    ];
    let best_for_prefix = |prefix: ClassCounts| {
        placements
            .iter()
            .map(|&(extra_belongs, extra_other)| {
                let below = ClassCounts::new(prefix.belongs + extra_belongs, prefix.other + extra_other);
                let above = ClassCounts::new(total.belongs - below.belongs, total.other - below.other);
                relaxed_gain(set_entropy, below, above)
            })
            .fold(f64::NEG_INFINITY, f64::max)
    };

    let mut prefix = ClassCounts::default();
    let mut bound = best_for_prefix(prefix);
    for (k, record) in sorted.iter().enumerate() {
        prefix.add(record.label);
        // Equal distances always fall on the same side of a threshold.
        let at_boundary = sorted
            .get(k + 1)
            .is_none_or(|next| next.distance != record.distance);
        if at_boundary {
            bound = bound.max(best_for_prefix(prefix));
        }
    }
    bound
}

/// Gain from class counts, accepting an empty side.
///
/// Same arithmetic as a valid split so equal counts give bit-identical gains.
fn relaxed_gain(set_entropy: f64, below: ClassCounts, above: ClassCounts) -> f64 {
    let total = (below.total() + above.total()) as f64;
    let below_weight = below.total() as f64 / total;
    let above_weight = above.total() as f64 / total;
    set_entropy - below_weight * below.entropy() - above_weight * above.entropy()
}
