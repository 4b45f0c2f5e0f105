//! Per-series distance records and class membership.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Dense index of a light curve within a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(usize);

impl SeriesId {
    /// Wrap a dataset index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the raw dataset index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two-way class partition: the target class versus everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassLabel {
    /// Not a member of the target class (label 0).
    Other,
    /// Member of the target class (label 1).
    Belongs,
}

impl ClassLabel {
    /// Return `1` for [`ClassLabel::Belongs`] and `0` for [`ClassLabel::Other`].
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Other => 0,
            Self::Belongs => 1,
        }
    }

    /// Return true for [`ClassLabel::Belongs`].
    #[must_use]
    pub const fn belongs(self) -> bool {
        matches!(self, Self::Belongs)
    }

    /// Return the other label.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Other => Self::Belongs,
            Self::Belongs => Self::Other,
        }
    }
}

impl From<bool> for ClassLabel {
    fn from(belongs: bool) -> Self {
        if belongs { Self::Belongs } else { Self::Other }
    }
}

/// Membership test for the target class.
pub trait ClassMembership {
    /// Return true if `id` belongs to the target class.
    fn contains(&self, id: SeriesId) -> bool;

    /// Label `id` according to membership.
    fn label(&self, id: SeriesId) -> ClassLabel {
        ClassLabel::from(self.contains(id))
    }
}

impl ClassMembership for HashSet<SeriesId> {
    fn contains(&self, id: SeriesId) -> bool {
        HashSet::contains(self, &id)
    }
}

impl ClassMembership for BTreeSet<SeriesId> {
    fn contains(&self, id: SeriesId) -> bool {
        BTreeSet::contains(self, &id)
    }
}

impl<M: ClassMembership + ?Sized> ClassMembership for &M {
    fn contains(&self, id: SeriesId) -> bool {
        (**self).contains(id)
    }
}

/// Nearest distance between one shapelet and one series, with the series' class.
///
/// `distance` is non-negative, or `f64::INFINITY` when the series has no
/// gap-free window of the shapelet's duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRecord {
    /// Series the distance was measured against.
    pub series_id: SeriesId,
    /// Minimum sum of squared differences over all valid alignments.
    pub distance: f64,
    /// Class of the series.
    pub label: ClassLabel,
}

impl DistanceRecord {
    /// Create a new record.
    #[must_use]
    pub const fn new(series_id: SeriesId, distance: f64, label: ClassLabel) -> Self {
        Self {
            series_id,
            distance,
            label,
        }
    }
}
