//! Binary entropy over the two-way class partition.

use lumen_series::{ClassLabel, DistanceRecord};

/// Binary entropy (bits) of a class-1 proportion `p` in `[0, 1]`.
///
/// Pure partitions (`p == 0` or `p == 1`) have entropy 0 by definition.
#[must_use]
pub fn entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    let q = 1.0 - p;
    -p * p.log2() - q * q.log2()
}

/// Class tallies of a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    /// Records labelled [`ClassLabel::Belongs`].
    pub belongs: usize,
    /// Records labelled [`ClassLabel::Other`].
    pub other: usize,
}

impl ClassCounts {
    /// Create counts from explicit tallies.
    #[must_use]
    pub const fn new(belongs: usize, other: usize) -> Self {
        Self { belongs, other }
    }

    /// Tally the labels of `records`.
    #[must_use]
    pub fn from_records(records: &[DistanceRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.add(record.label);
        }
        counts
    }

    /// Count one more record of class `label`.
    pub fn add(&mut self, label: ClassLabel) {
        match label {
            ClassLabel::Belongs => self.belongs += 1,
            ClassLabel::Other => self.other += 1,
        }
    }

    /// Return the total number of records.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.belongs + self.other
    }

    /// Return the class-1 proportion, or `None` for an empty tally.
    #[must_use]
    pub fn proportion(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.belongs as f64 / total as f64)
    }

    /// Return the binary entropy of these counts; 0 when empty.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        self.proportion().map_or(0.0, entropy)
    }
}

/// Entropy of the class proportions of a full record set.
#[must_use]
pub fn set_entropy(records: &[DistanceRecord]) -> f64 {
    ClassCounts::from_records(records).entropy()
}
