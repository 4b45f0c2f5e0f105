//! JSON result writer for shapelet search and classification outputs.

use std::fs;
use std::path::{Path, PathBuf};

use lumen_search::SearchResult;
use lumen_series::ClassLabel;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{ExperimentName, SeriesName};

/// Writes search and prediction results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_shapelet.json` and
/// `{experiment}_predictions.json`. Infinite distances are written as `null`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Return the path of `{experiment}_shapelet.json`.
    #[must_use]
    pub fn shapelet_path(&self) -> PathBuf {
        self.artifact_path("shapelet")
    }

    /// Return the path of `{experiment}_predictions.json`.
    #[must_use]
    pub fn predictions_path(&self) -> PathBuf {
        self.artifact_path("predictions")
    }

    /// Write a search result to `{experiment}_shapelet.json`.
    ///
    /// `names[i]` must name the series with id `i`; `target` is the state the
    /// search separated from the rest.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Serialize`] or [`IoError::WriteFile`] if the
    /// artifact cannot be produced.
    #[instrument(skip_all)]
    pub fn write_search(
        &self,
        names: &[SeriesName],
        target: &str,
        result: &SearchResult,
    ) -> Result<PathBuf, IoError> {
        let name_of = |index: usize| names.get(index).map_or("", SeriesName::as_str);
        let time_res = result.evaluator().gap().time_res();

        let best = result.best.as_ref().map(|best| {
            let classifier_below = result
                .classifier()
                .map_or(ClassLabel::Belongs, |c| c.below_label());
            BestArtifact {
                source_series: best.shapelet.origin().map(|o| name_of(o.series.index())),
                source_start: best.shapelet.origin().map(|o| o.start),
                n_samples: best.shapelet.len(),
                duration: best.shapelet.duration(time_res),
                values: best.shapelet.values(),
                split_point: best.split_point,
                gain: best.gain,
                below_label: classifier_below.as_u8(),
                distances: best
                    .records
                    .iter()
                    .map(|r| DistanceEntry {
                        series: name_of(r.series_id.index()),
                        distance: r.distance,
                        label: r.label.as_u8(),
                    })
                    .collect(),
            }
        });

        let artifact = SearchArtifact {
            experiment: self.experiment.as_str(),
            target,
            time_res,
            gap_tolerance: result.evaluator().gap().tolerance(),
            n_series: names.len(),
            n_belongs: result.class_counts.belongs,
            n_other: result.class_counts.other,
            set_entropy: result.set_entropy,
            n_candidates: result.n_candidates,
            n_pruned: result.n_pruned,
            best,
        };

        let path = self.shapelet_path();
        write_json(&path, &artifact)?;
        info!(path = %path.display(), "shapelet result written");
        Ok(path)
    }

    /// Write classifier predictions to `{experiment}_predictions.json`.
    ///
    /// `names`, `labels` and `distances` are parallel slices; `truth`, when
    /// given, holds the reference label of each series and adds an accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Serialize`] or [`IoError::WriteFile`] if the
    /// artifact cannot be produced.
    #[instrument(skip_all, fields(n = names.len()))]
    pub fn write_predictions(
        &self,
        names: &[SeriesName],
        labels: &[ClassLabel],
        distances: &[f64],
        truth: Option<&[ClassLabel]>,
    ) -> Result<PathBuf, IoError> {
        let predictions: Vec<PredictionEntry> = names
            .iter()
            .zip(labels)
            .zip(distances)
            .enumerate()
            .map(|(i, ((name, label), &distance))| PredictionEntry {
                series: name.as_str(),
                predicted: label.as_u8(),
                distance,
                expected: truth.and_then(|t| t.get(i)).map(|l| l.as_u8()),
            })
            .collect();

        let accuracy = truth.map(|t| accuracy(labels, t));

        let artifact = PredictionArtifact {
            experiment: self.experiment.as_str(),
            n_series: predictions.len(),
            n_predicted_belongs: labels.iter().filter(|l| l.belongs()).count(),
            accuracy,
            predictions,
        };

        let path = self.predictions_path();
        write_json(&path, &artifact)?;
        info!(path = %path.display(), ?accuracy, "predictions written");
        Ok(path)
    }

    fn artifact_path(&self, kind: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{kind}.json", self.experiment.as_str()))
    }
}

/// Fraction of positions where `predicted` and `truth` agree; 0 when empty.
#[must_use]
pub fn accuracy(predicted: &[ClassLabel], truth: &[ClassLabel]) -> f64 {
    let n = predicted.len().min(truth.len());
    if n == 0 {
        return 0.0;
    }
    let correct = predicted.iter().zip(truth).filter(|(p, t)| p == t).count();
    correct as f64 / n as f64
}

fn write_json<T: Serialize>(path: &Path, artifact: &T) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(artifact).map_err(|e| IoError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, &json).map_err(|e| IoError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct SearchArtifact<'a> {
    experiment: &'a str,
    target: &'a str,
    time_res: f64,
    gap_tolerance: f64,
    n_series: usize,
    n_belongs: usize,
    n_other: usize,
    set_entropy: f64,
    n_candidates: usize,
    n_pruned: usize,
    best: Option<BestArtifact<'a>>,
}

#[derive(Serialize)]
struct BestArtifact<'a> {
    source_series: Option<&'a str>,
    source_start: Option<usize>,
    n_samples: usize,
    duration: f64,
    values: &'a [f64],
    split_point: f64,
    gain: f64,
    below_label: u8,
    distances: Vec<DistanceEntry<'a>>,
}

#[derive(Serialize)]
struct DistanceEntry<'a> {
    series: &'a str,
    distance: f64,
    label: u8,
}

#[derive(Serialize)]
struct PredictionArtifact<'a> {
    experiment: &'a str,
    n_series: usize,
    n_predicted_belongs: usize,
    accuracy: Option<f64>,
    predictions: Vec<PredictionEntry<'a>>,
}

#[derive(Serialize)]
struct PredictionEntry<'a> {
    series: &'a str,
    predicted: u8,
    distance: f64,
    expected: Option<u8>,
}
