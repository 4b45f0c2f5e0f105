//! Shapelet candidate type.

use std::ops::Index;

use crate::error::SeriesError;
use crate::record::SeriesId;

/// Where a shapelet was extracted from. Carries no timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeletOrigin {
    /// Series the values were copied from.
    pub series: SeriesId,
    /// Index of the first copied sample in that series.
    pub start: usize,
}

/// An immutable run of sample values copied verbatim from a gap-free window.
///
/// Independent of its source light curve once created. A shapelet of `L`
/// samples spans `(L - 1) * time_res` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Shapelet {
    values: Vec<f64>,
    origin: Option<ShapeletOrigin>,
}

impl Shapelet {
    /// Create a shapelet from raw values, validating that they are non-empty and finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::EmptySeries`] | `values` is empty |
    /// | [`SeriesError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(values: Vec<f64>) -> Result<Self, SeriesError> {
        if values.is_empty() {
            return Err(SeriesError::EmptySeries);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFiniteValue { index });
        }
        Ok(Self {
            values,
            origin: None,
        })
    }

    /// Create a shapelet from a slice of an already-validated light curve.
    pub(crate) fn from_window(values: &[f64], origin: ShapeletOrigin) -> Self {
        Self {
            values: values.to_vec(),
            origin: Some(origin),
        }
    }

    /// Tag the shapelet with the series and offset it came from.
    #[must_use]
    pub fn with_origin(mut self, origin: ShapeletOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Return the sample values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Return the source series and offset, if known.
    #[must_use]
    pub fn origin(&self) -> Option<ShapeletOrigin> {
        self.origin
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a validated shapelet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the time spanned by the shapelet at the given resolution.
    #[must_use]
    pub fn duration(&self, time_res: f64) -> f64 {
        (self.values.len() - 1) as f64 * time_res
    }
}

impl Index<usize> for Shapelet {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl AsRef<[f64]> for Shapelet {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for Shapelet {
    type Error = SeriesError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(matches!(Shapelet::new(vec![]), Err(SeriesError::EmptySeries)));
    }

    #[test]
    fn rejects_nan() {
        let result = Shapelet::new(vec![1.0, f64::NAN]);
        assert!(matches!(result, Err(SeriesError::NonFiniteValue { index: 1 })));
    }

    #[test]
    fn duration_counts_intervals() {
        let s = Shapelet::new(vec![1.0, 1.0, 1.0]).unwrap();
        assert!((s.duration(0.5) - 1.0).abs() < f64::EPSILON);
        let single = Shapelet::new(vec![4.0]).unwrap();
        assert_eq!(single.duration(1.0), 0.0);
    }

    #[test]
    fn origin_is_optional() {
        let s = Shapelet::new(vec![1.0, 2.0]).unwrap();
        assert!(s.origin().is_none());
        let origin = ShapeletOrigin {
            series: SeriesId::new(3),
            start: 7,
        };
        let tagged = s.with_origin(origin);
        assert_eq!(tagged.origin(), Some(origin));
        assert_eq!(tagged[1], 2.0);
    }
}
