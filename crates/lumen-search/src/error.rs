use lumen_series::SeriesError;

/// Errors from shapelet search and classifier construction.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Returned when `fit` is called with no light curves.
    #[error("dataset contains no light curves")]
    EmptyDataset,

    /// Returned when no candidate achieved positive information gain.
    #[error("no shapelet achieved positive information gain")]
    NoShapelet,

    /// Wraps an invalid resolution, tolerance, or duration bound.
    #[error("invalid search parameters: {0}")]
    Series(#[from] SeriesError),
}
