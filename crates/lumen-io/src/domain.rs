//! Domain types for lumen-io.

use lumen_series::{LightCurve, SeriesId};

use crate::IoError;

/// Name of a light curve as written in the input files.
///
/// Wraps a non-empty string; the dense [`SeriesId`] used by the search is the
/// name's position in its [`LightCurveDataset`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesName(String);

impl SeriesName {
    /// Create a series name from a non-empty string.
    pub(crate) fn new(name: String) -> Self {
        debug_assert!(!name.is_empty(), "series name must not be empty");
        Self(name)
    }

    /// Return the series name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named light curves in file order.
///
/// Produced by [`LightCurveReader`](crate::LightCurveReader). `names[i]`
/// corresponds to `curves[i]`, and both are addressed by `SeriesId::new(i)`.
#[derive(Debug)]
pub struct LightCurveDataset {
    names: Vec<SeriesName>,
    curves: Vec<LightCurve>,
}

impl LightCurveDataset {
    pub(crate) fn new(names: Vec<SeriesName>, curves: Vec<LightCurve>) -> Self {
        debug_assert_eq!(names.len(), curves.len());
        Self { names, curves }
    }

    /// Return the series names.
    #[must_use]
    pub fn names(&self) -> &[SeriesName] {
        &self.names
    }

    /// Return the light curves.
    #[must_use]
    pub fn curves(&self) -> &[LightCurve] {
        &self.curves
    }

    /// Return the name of the series with the given id, if in range.
    #[must_use]
    pub fn name(&self, id: SeriesId) -> Option<&SeriesName> {
        self.names.get(id.index())
    }

    /// Iterate over `(id, name, curve)` triples in file order.
    pub fn iter(&self) -> impl Iterator<Item = (SeriesId, &SeriesName, &LightCurve)> {
        self.names
            .iter()
            .zip(&self.curves)
            .enumerate()
            .map(|(i, (name, curve))| (SeriesId::new(i), name, curve))
    }

    /// Return the number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Return `true` if the dataset holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
