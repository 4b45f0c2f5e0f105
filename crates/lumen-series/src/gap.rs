//! Fixed-resolution sampling model used to detect gaps in a light curve.

use crate::error::SeriesError;

/// Decides whether a contiguous index range of a light curve is evenly sampled.
///
/// A window `[start, end]` (inclusive) is gap-free when the elapsed time between
/// its first and last sample equals `(end - start) * time_res` within
/// `tolerance` seconds. Immutable, thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapModel {
    time_res: f64,
    tolerance: f64,
}

impl GapModel {
    /// Create a gap model for the given sampling resolution.
    ///
    /// The tolerance defaults to `time_res / 2`. On a fixed sampling grid any
    /// missing sample moves the elapsed time by a whole `time_res`, so this
    /// absorbs floating-point error without admitting gapped windows.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidResolution`] if `time_res` is not finite
    /// and positive.
    pub fn new(time_res: f64) -> Result<Self, SeriesError> {
        if !time_res.is_finite() || time_res <= 0.0 {
            return Err(SeriesError::InvalidResolution { time_res });
        }
        Ok(Self {
            time_res,
            tolerance: time_res / 2.0,
        })
    }

    /// Override the absolute tolerance in seconds. Zero demands exact equality.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidTolerance`] unless `0 <= tolerance <= time_res / 2`.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, SeriesError> {
        let max = self.time_res / 2.0;
        if !(0.0..=max).contains(&tolerance) {
            return Err(SeriesError::InvalidTolerance { tolerance, max });
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    /// Return the nominal sampling resolution in seconds.
    #[must_use]
    pub fn time_res(&self) -> f64 {
        self.time_res
    }

    /// Return the absolute tolerance in seconds.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Return true if `times[start..=end]` contains no missing samples.
    ///
    /// Callers guarantee `start <= end < times.len()`.
    #[must_use]
    #[inline]
    pub fn is_contiguous(&self, times: &[f64], start: usize, end: usize) -> bool {
        let elapsed = times[end] - times[start];
        let expected = (end - start) as f64 * self.time_res;
        (elapsed - expected).abs() <= self.tolerance
    }

    /// Convert a duration in seconds to a whole number of sampling steps (floored).
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidDuration`] if `duration` is negative or non-finite.
    pub fn steps(&self, duration: f64) -> Result<usize, SeriesError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(SeriesError::InvalidDuration { duration });
        }
        Ok((duration / self.time_res).floor() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_resolution() {
        assert!(matches!(
            GapModel::new(0.0),
            Err(SeriesError::InvalidResolution { .. })
        ));
        assert!(matches!(
            GapModel::new(-1.0),
            Err(SeriesError::InvalidResolution { .. })
        ));
        assert!(matches!(
            GapModel::new(f64::NAN),
            Err(SeriesError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn default_tolerance_is_half_resolution() {
        let gap = GapModel::new(2.0).unwrap();
        assert!((gap.tolerance() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_tolerance_above_half_resolution() {
        let result = GapModel::new(1.0).unwrap().with_tolerance(0.6);
        assert!(matches!(result, Err(SeriesError::InvalidTolerance { .. })));
    }

    #[test]
    fn rejects_negative_tolerance() {
        let result = GapModel::new(1.0).unwrap().with_tolerance(-0.1);
        assert!(matches!(result, Err(SeriesError::InvalidTolerance { .. })));
    }

    #[test]
    fn even_window_is_contiguous() {
        let gap = GapModel::new(1.0).unwrap();
        let times = [0.0, 1.0, 2.0, 3.0];
        assert!(gap.is_contiguous(&times, 0, 3));
        assert!(gap.is_contiguous(&times, 1, 2));
        assert!(gap.is_contiguous(&times, 2, 2));
    }

    #[test]
    fn window_across_gap_is_not_contiguous() {
        let gap = GapModel::new(1.0).unwrap();
        let times = [0.0, 1.0, 2.0, 10.0, 11.0];
        assert!(gap.is_contiguous(&times, 0, 2));
        assert!(!gap.is_contiguous(&times, 1, 3));
        assert!(gap.is_contiguous(&times, 3, 4));
    }

    #[test]
    fn tolerance_absorbs_rounding() {
        let gap = GapModel::new(0.1).unwrap();
        // 0.1 * 3 accumulates rounding error in binary floating point.
        let times = [0.0, 0.1, 0.2, 0.1 + 0.1 + 0.1];
        assert!(gap.is_contiguous(&times, 0, 3));
    }

    #[test]
    fn zero_tolerance_demands_exact_elapsed_time() {
        let gap = GapModel::new(1.0).unwrap().with_tolerance(0.0).unwrap();
        let times = [0.0, 1.0, 2.000_001];
        assert!(gap.is_contiguous(&times, 0, 1));
        assert!(!gap.is_contiguous(&times, 0, 2));
    }

    #[test]
    fn steps_floor_duration() {
        let gap = GapModel::new(0.5).unwrap();
        assert_eq!(gap.steps(0.0).unwrap(), 0);
        assert_eq!(gap.steps(1.0).unwrap(), 2);
        assert_eq!(gap.steps(1.4).unwrap(), 2);
    }

    #[test]
    fn steps_rejects_negative_duration() {
        let gap = GapModel::new(1.0).unwrap();
        assert!(matches!(
            gap.steps(-1.0),
            Err(SeriesError::InvalidDuration { .. })
        ));
    }
}
