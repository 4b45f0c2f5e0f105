//! Target-class membership from state labels.

use std::collections::HashSet;

use lumen_series::SeriesId;
use tracing::{info, instrument, warn};

use crate::domain::LightCurveDataset;
use crate::labels::StateLabels;

/// Collect the ids of every series in `dataset` labelled with `target`.
///
/// Series missing from `labels` are treated as not belonging and are logged
/// at `warn`, as is a target that names no known state.
#[instrument(skip_all, fields(state = %target, n_series = dataset.len()))]
pub fn target_membership(
    dataset: &LightCurveDataset,
    labels: &StateLabels,
    target: &str,
) -> HashSet<SeriesId> {
    if !labels.states().iter().any(|s| s == target) {
        warn!(state = %target, known = ?labels.states(), "target state does not appear in the label file");
    }

    let mut belongs = HashSet::new();
    let mut n_unlabelled = 0usize;
    for (id, name, _) in dataset.iter() {
        match labels.state_of(name.as_str()) {
            Some(state) if state == target => {
                belongs.insert(id);
            }
            Some(_) => {}
            None => {
                n_unlabelled += 1;
                warn!(series = %name, "series has no label; treating it as other");
            }
        }
    }

    info!(
        n_belongs = belongs.len(),
        n_other = dataset.len() - belongs.len(),
        n_unlabelled,
        "target membership resolved"
    );
    belongs
}
