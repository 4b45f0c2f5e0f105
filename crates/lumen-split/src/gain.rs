//! Information gain of partitioning a record set at a distance threshold.

use lumen_series::DistanceRecord;

use crate::entropy::ClassCounts;
use crate::error::{InvalidSplitPoint, Partition};

/// Reject thresholds that can never be used, before looking at any record.
pub(crate) fn check_split_point(split_point: f64) -> Result<(), InvalidSplitPoint> {
    if split_point == 0.0 {
        return Err(InvalidSplitPoint::Zero);
    }
    if split_point.is_infinite() {
        return Err(InvalidSplitPoint::Infinite);
    }
    Ok(())
}

/// Weighted entropy reduction given the class counts on each side.
pub(crate) fn gain_from_counts(
    set_entropy: f64,
    split_point: f64,
    below: ClassCounts,
    above: ClassCounts,
) -> Result<f64, InvalidSplitPoint> {
    if below.total() == 0 {
        return Err(InvalidSplitPoint::EmptyPartition {
            split_point,
            side: Partition::Below,
        });
    }
    if above.total() == 0 {
        return Err(InvalidSplitPoint::EmptyPartition {
            split_point,
            side: Partition::AtOrAbove,
        });
    }
    let total = (below.total() + above.total()) as f64;
    let below_weight = below.total() as f64 / total;
    let above_weight = above.total() as f64 / total;
    Ok(set_entropy - below_weight * below.entropy() - above_weight * above.entropy())
}

/// Information gain of splitting `records` at `split_point`.
///
/// Records with `distance < split_point` go below, the rest at-or-above.
/// `set_entropy` is the entropy of the full record set and is supplied by the
/// caller rather than recomputed.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`InvalidSplitPoint::Zero`] | `split_point == 0` |
/// | [`InvalidSplitPoint::Infinite`] | `split_point` is infinite |
/// | [`InvalidSplitPoint::EmptyPartition`] | Either side holds no record |
pub fn information_gain(
    records: &[DistanceRecord],
    set_entropy: f64,
    split_point: f64,
) -> Result<f64, InvalidSplitPoint> {
    check_split_point(split_point)?;
    let mut below = ClassCounts::default();
    let mut above = ClassCounts::default();
    for record in records {
        if record.distance < split_point {
            below.add(record.label);
        } else {
            above.add(record.label);
        }
    }
    gain_from_counts(set_entropy, split_point, below, above)
}
