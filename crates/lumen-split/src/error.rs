use std::fmt;

/// Side of a distance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Records with `distance < split_point`.
    Below,
    /// Records with `distance >= split_point`.
    AtOrAbove,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Below => f.write_str("below"),
            Self::AtOrAbove => f.write_str("at-or-above"),
        }
    }
}

/// A distance threshold that cannot partition a record set.
///
/// Recovered locally by skipping the threshold. It is never a gain of zero.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidSplitPoint {
    /// The threshold is zero.
    #[error("split point is zero")]
    Zero,

    /// The threshold is positive or negative infinity.
    #[error("split point is infinite")]
    Infinite,

    /// One side of the threshold holds no records.
    #[error("split point {split_point} leaves the {side} partition empty")]
    EmptyPartition {
        /// The offending threshold.
        split_point: f64,
        /// The side that is empty.
        side: Partition,
    },
}
