//! Error types for light curve validation and shapelet generation.

/// Errors from light curve construction and search parameter validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a light curve or shapelet has no samples.
    #[error("series must be non-empty")]
    EmptySeries,

    /// Returned when the timestamp and value vectors differ in length.
    #[error("got {times} timestamps but {values} values")]
    LengthMismatch {
        /// Number of timestamps provided.
        times: usize,
        /// Number of values provided.
        values: usize,
    },

    /// Returned when a value is NaN, infinity, or negative infinity.
    #[error("series contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when a timestamp is NaN, infinity, or negative infinity.
    #[error("series contains non-finite timestamp at index {index}")]
    NonFiniteTimestamp {
        /// Position of the first non-finite timestamp found.
        index: usize,
    },

    /// Returned when a timestamp is not strictly greater than its predecessor.
    #[error("timestamp at index {index} ({time}) does not exceed the previous one ({previous})")]
    NonIncreasingTimestamp {
        /// Position of the offending timestamp.
        index: usize,
        /// The offending timestamp.
        time: f64,
        /// The timestamp immediately before it.
        previous: f64,
    },

    /// Returned when the sampling resolution is not a positive finite number.
    #[error("time resolution must be finite and positive, got {time_res}")]
    InvalidResolution {
        /// The invalid resolution in seconds.
        time_res: f64,
    },

    /// Returned when the gap tolerance lies outside `[0, time_res / 2]`.
    #[error("gap tolerance must be in [0, {max}], got {tolerance}")]
    InvalidTolerance {
        /// The invalid tolerance in seconds.
        tolerance: f64,
        /// The largest accepted tolerance (`time_res / 2`).
        max: f64,
    },

    /// Returned when a shapelet duration bound is negative or non-finite.
    #[error("shapelet duration must be finite and non-negative, got {duration}")]
    InvalidDuration {
        /// The invalid duration in seconds.
        duration: f64,
    },
}
