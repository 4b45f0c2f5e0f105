//! Light curve type with validation guarantees.

use crate::error::SeriesError;

/// Owned, validated light curve: sample timestamps (seconds) and count rates.
///
/// Guaranteed non-empty, with equal-length finite timestamps and values and
/// strictly increasing timestamps. Sampling may contain gaps; see
/// [`GapModel`](crate::GapModel).
#[derive(Debug, Clone, PartialEq)]
pub struct LightCurve {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl LightCurve {
    /// Create a new light curve from parallel timestamp and value vectors.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::EmptySeries`] | `times` and `values` are both empty |
    /// | [`SeriesError::LengthMismatch`] | `times.len() != values.len()` |
    /// | [`SeriesError::NonFiniteTimestamp`] | Any timestamp is NaN or infinite |
    /// | [`SeriesError::NonFiniteValue`] | Any value is NaN or infinite |
    /// | [`SeriesError::NonIncreasingTimestamp`] | Timestamps are not strictly increasing |
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if times.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.is_empty() {
            return Err(SeriesError::EmptySeries);
        }
        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(SeriesError::NonFiniteTimestamp { index });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFiniteValue { index });
        }
        if let Some(w) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SeriesError::NonIncreasingTimestamp {
                index: w + 1,
                time: times[w + 1],
                previous: times[w],
            });
        }
        Ok(Self { times, values })
    }

    /// Create an evenly sampled light curve starting at `t0` with step `time_res`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LightCurve::new`], plus
    /// [`SeriesError::InvalidResolution`] if `time_res` is not positive and finite.
    pub fn regular(t0: f64, time_res: f64, values: Vec<f64>) -> Result<Self, SeriesError> {
        if !time_res.is_finite() || time_res <= 0.0 {
            return Err(SeriesError::InvalidResolution { time_res });
        }
        let times = (0..values.len()).map(|i| t0 + i as f64 * time_res).collect();
        Self::new(times, values)
    }

    /// Return the sample timestamps in seconds.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Return the sample values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return true if the light curve has no samples.
    ///
    /// A [`LightCurve`] constructed via [`LightCurve::new`] is always non-empty,
    /// so this always returns `false` for valid instances. Provided to satisfy
    /// the `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the elapsed time between the first and last sample.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.times[self.times.len() - 1] - self.times[0]
    }
}
