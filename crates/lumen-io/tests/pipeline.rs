//! End-to-end integration tests: labels + CSV -> search -> JSON -> deserialize.

use std::fs;
use std::path::{Path, PathBuf};

use lumen_io::{ExperimentName, LabelReader, LightCurveReader, ResultWriter, target_membership};
use lumen_search::{Parallelism, PruningMode, SearchConfig};
use lumen_series::{ClassLabel, SeriesId};
use tempfile::TempDir;

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn fixtures_parse() {
    let dataset = LightCurveReader::new(&fixture_path("curves_6x12.csv"))
        .read()
        .expect("fixture should parse");
    assert_eq!(dataset.len(), 6);
    assert!(dataset.curves().iter().all(|c| c.len() == 12));
    assert_eq!(dataset.names()[2].as_str(), "obs03_lc");

    let labels = LabelReader::new(&fixture_path("labels.txt"))
        .with_id_suffix("_lc")
        .read()
        .expect("labels should parse");
    assert_eq!(labels.states(), &["chi", "rho", "gamma"]);
    assert_eq!(labels.members("chi"), vec!["obs01_lc", "obs03_lc", "obs05_lc"]);
    assert_eq!(labels.members("rho"), vec!["obs02_lc", "obs06_lc"]);
    assert_eq!(labels.state_of("obs04_lc"), Some("gamma"));
}

#[test]
fn search_round_trip() {
    // 1. Read inputs
    let dataset = LightCurveReader::new(&fixture_path("curves_6x12.csv"))
        .read()
        .unwrap();
    let labels = LabelReader::new(&fixture_path("labels.txt"))
        .with_id_suffix("_lc")
        .read()
        .unwrap();
    let belongs = target_membership(&dataset, &labels, "chi");
    assert_eq!(belongs.len(), 3);
    assert!(belongs.contains(&SeriesId::new(0)));

    // 2. Search for 3-sample shapelets; obs03 has a gap after t=5
    let config = SearchConfig::new(2.0, 2.0, 1.0)
        .unwrap()
        .with_pruning(PruningMode::Disabled)
        .with_parallelism(Parallelism::Parallel);
    let result = config.fit(dataset.curves(), &belongs).unwrap();
    assert_eq!(result.n_candidates, 5 * 10 + 8);

    let best = result.best.as_ref().expect("bump separates the classes");
    assert!((best.gain - 1.0).abs() < 1e-12);
    assert_eq!(best.key.series, SeriesId::new(0));
    assert!(best.shapelet.values().contains(&4.0));

    // 3. Classify the training set
    let classifier = result.classifier().unwrap();
    let predicted = classifier.classify_batch(dataset.curves());
    let truth: Vec<ClassLabel> = (0..dataset.len())
        .map(|i| ClassLabel::from(belongs.contains(&SeriesId::new(i))))
        .collect();
    assert_eq!(predicted, truth);
    let distances: Vec<f64> = dataset.curves().iter().map(|c| classifier.distance(c)).collect();

    // 4. Write JSON artifacts
    let dir = TempDir::new().unwrap();
    let experiment = ExperimentName::new("chi_rt".into()).unwrap();
    let writer = ResultWriter::new(dir.path(), experiment).unwrap();
    let shapelet_path = writer.write_search(dataset.names(), "chi", &result).unwrap();
    let predictions_path = writer
        .write_predictions(dataset.names(), &predicted, &distances, Some(&truth))
        .unwrap();

    // 5. Deserialize back and verify
    let shapelet: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&shapelet_path).unwrap()).unwrap();
    assert_eq!(shapelet["experiment"], "chi_rt");
    assert_eq!(shapelet["n_belongs"], 3);
    assert_eq!(shapelet["n_other"], 3);
    assert_eq!(shapelet["best"]["source_series"], "obs01_lc");
    assert_eq!(shapelet["best"]["n_samples"], 3);
    assert_eq!(shapelet["best"]["distances"].as_array().unwrap().len(), 6);

    let predictions: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&predictions_path).unwrap()).unwrap();
    assert_eq!(predictions["accuracy"], 1.0);
    assert_eq!(predictions["n_predicted_belongs"], 3);
    for entry in predictions["predictions"].as_array().unwrap() {
        assert_eq!(entry["predicted"], entry["expected"]);
    }
}

#[test]
fn missing_labels_count_as_other() {
    let dataset = LightCurveReader::new(&fixture_path("curves_6x12.csv"))
        .read()
        .unwrap();
    // Without the suffix no identifier matches a series name.
    let labels = LabelReader::new(&fixture_path("labels.txt")).read().unwrap();
    assert!(target_membership(&dataset, &labels, "chi").is_empty());
}
