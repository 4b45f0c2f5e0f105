//! Whitespace-delimited class-state label files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::IoError;

/// Sub-states that are folded into a single `chi` state on read.
const CHI_SUBSTATES: [&str; 4] = ["chi1", "chi2", "chi3", "chi4"];

/// Series-name to class-state mapping parsed from a label file.
#[derive(Debug, Clone, Default)]
pub struct StateLabels {
    states: Vec<String>,
    assignments: HashMap<String, String>,
}

impl StateLabels {
    /// Return the distinct state names in header order, after collapsing.
    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Return the state assigned to `series`, if any.
    #[must_use]
    pub fn state_of(&self, series: &str) -> Option<&str> {
        self.assignments.get(series).map(String::as_str)
    }

    /// Return the names labelled with `state`, sorted.
    #[must_use]
    pub fn members(&self, state: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .assignments
            .iter()
            .filter(|(_, s)| s.as_str() == state)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Return the number of labelled series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Return `true` if no series carries a label.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

fn collapse_state(name: &str) -> &str {
    if CHI_SUBSTATES.contains(&name) { "chi" } else { name }
}

/// Reads class-state labels from a whitespace-delimited text file.
///
/// Expected format:
/// - First line: state names, e.g. `alpha beta chi1 chi2 gamma`
/// - Line `k + 1`: every series identifier in the `k`-th state, separated by
///   whitespace. A blank line is a state with no members; states past the
///   last line have none either. Lines past the last state are ignored with
///   a warning.
///
/// `chi1` through `chi4` collapse to `chi`. An identifier listed more than
/// once keeps its last state.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::EmptyLabelFile`] | No non-blank header line |
pub struct LabelReader {
    path: PathBuf,
    id_suffix: String,
}

impl LabelReader {
    /// Create a new reader for the given label file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            id_suffix: String::new(),
        }
    }

    /// Append `suffix` to every identifier read from the file.
    ///
    /// Label files often list bare observation ids while the light curves are
    /// keyed by a file name derived from them.
    #[must_use]
    pub fn with_id_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.id_suffix = suffix.into();
        self
    }

    /// Read and parse the label file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<StateLabels, IoError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        self.parse(&content)
    }

    fn parse(&self, content: &str) -> Result<StateLabels, IoError> {
        let mut lines = content.lines().skip_while(|line| line.trim().is_empty());

        let header = lines.next().ok_or_else(|| IoError::EmptyLabelFile {
            path: self.path.clone(),
        })?;
        let rows: Vec<&str> = header.split_whitespace().map(collapse_state).collect();

        let mut states: Vec<String> = Vec::new();
        for &state in &rows {
            if !states.iter().any(|s| s == state) {
                states.push(state.to_string());
            }
        }
        debug!(n_rows = rows.len(), n_states = states.len(), "read label header");

        let body: Vec<&str> = lines.collect();
        let extra = body[body.len().min(rows.len())..]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .count();
        if extra > 0 {
            warn!(extra, "label file has more member lines than states; ignoring the excess");
        }

        let mut assignments: HashMap<String, String> = HashMap::new();
        for (&state, line) in rows.iter().zip(&body) {
            for token in line.split_whitespace() {
                let id = format!("{token}{}", self.id_suffix);
                if let Some(previous) = assignments.insert(id.clone(), state.to_string())
                    && previous != state
                {
                    warn!(series = %id, previous = %previous, state, "series labelled twice; keeping the last state");
                }
            }
        }

        info!(n_states = states.len(), n_labelled = assignments.len(), "labels loaded");
        Ok(StateLabels { states, assignments })
    }
}
