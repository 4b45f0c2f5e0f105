use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use lumen_io::{
    ExperimentName, LabelReader, LightCurveDataset, LightCurveReader, ResultWriter, accuracy,
    target_membership,
};
use lumen_search::{Parallelism, PruningMode, SearchConfig};
use lumen_series::{ClassLabel, EarlyAbandon, SeriesId};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Gap-aware shapelet discovery for irregularly sampled light curves")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Search tuning parameters.
#[derive(Args, Debug, Clone)]
struct TuningArgs {
    /// Shortest candidate duration in seconds
    #[arg(long)]
    min_duration: f64,

    /// Longest candidate duration in seconds
    #[arg(long)]
    max_duration: f64,

    /// Sampling interval of the light curves in seconds
    #[arg(long, default_value_t = 1.0)]
    time_res: f64,

    /// Absolute timing tolerance for gap detection (defaults to time_res / 2)
    #[arg(long)]
    gap_tolerance: Option<f64>,

    /// Score every candidate against every series (disables the entropy bound)
    #[arg(long, default_value_t = false, conflicts_with = "heuristic_prune")]
    no_prune: bool,

    /// Prune at the best partial split only; faster, but may miss the best shapelet
    #[arg(long, default_value_t = false)]
    heuristic_prune: bool,

    /// Always complete the distance sum at every alignment
    #[arg(long, default_value_t = false)]
    no_early_abandon: bool,

    /// Evaluate candidates on the calling thread only
    #[arg(long, default_value_t = false)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Find the shapelet that best separates one class state from the rest
    Search {
        /// Path to the light curve CSV file (series_id,time,rate)
        #[arg(long)]
        data: PathBuf,

        /// Path to the whitespace-delimited label file
        #[arg(long)]
        labels: PathBuf,

        /// Class state to separate from all others (e.g. "chi")
        #[arg(long)]
        target: String,

        /// Suffix appended to every identifier in the label file
        #[arg(long, default_value = "")]
        id_suffix: String,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Light curve CSV to classify with the learned shapelet (defaults to --data)
        #[arg(long)]
        evaluate: Option<PathBuf>,

        #[command(flatten)]
        tuning: TuningArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct SearchOutput {
    experiment: String,
    target: String,
    n_series: usize,
    n_belongs: usize,
    n_candidates: usize,
    n_pruned: usize,
    set_entropy: f64,
    shapelet: Option<ShapeletOutput>,
    evaluation: Option<EvaluationOutput>,
}

#[derive(Serialize)]
struct ShapeletOutput {
    source_series: Option<String>,
    source_start: Option<usize>,
    n_samples: usize,
    split_point: f64,
    gain: f64,
}

#[derive(Serialize)]
struct EvaluationOutput {
    data: String,
    n_series: usize,
    n_predicted_belongs: usize,
    accuracy: f64,
}

fn build_config(tuning: &TuningArgs) -> Result<SearchConfig> {
    let mut config = SearchConfig::new(tuning.min_duration, tuning.max_duration, tuning.time_res)
        .context("invalid search configuration")?;
    if let Some(tolerance) = tuning.gap_tolerance {
        config = config
            .with_gap_tolerance(tolerance)
            .context("invalid gap tolerance")?;
    }
    if tuning.no_prune {
        config = config.with_pruning(PruningMode::Disabled);
    } else if tuning.heuristic_prune {
        config = config.with_pruning(PruningMode::Heuristic);
    }
    if tuning.no_early_abandon {
        config = config.with_early_abandon(EarlyAbandon::Disabled);
    }
    if tuning.sequential {
        config = config.with_parallelism(Parallelism::Sequential);
    }
    Ok(config)
}

fn read_curves(path: &Path) -> Result<LightCurveDataset> {
    LightCurveReader::new(path)
        .read()
        .with_context(|| format!("failed to read light curves from {}", path.display()))
}

fn truth_labels(dataset: &LightCurveDataset, belongs: &HashSet<SeriesId>) -> Vec<ClassLabel> {
    dataset
        .iter()
        .map(|(id, _, _)| ClassLabel::from(belongs.contains(&id)))
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Search {
            data,
            labels,
            target,
            id_suffix,
            experiment,
            output_dir,
            evaluate,
            tuning,
        } => {
            let experiment = ExperimentName::new(experiment).context("invalid experiment name")?;
            let config = build_config(&tuning)?;

            let dataset = read_curves(&data)?;
            let state_labels = LabelReader::new(&labels)
                .with_id_suffix(id_suffix)
                .read()
                .with_context(|| format!("failed to read labels from {}", labels.display()))?;
            let belongs = target_membership(&dataset, &state_labels, &target);

            let result = config
                .fit(dataset.curves(), &belongs)
                .context("shapelet search failed")?;

            let writer = ResultWriter::new(&output_dir, experiment.clone())
                .context("failed to prepare output directory")?;
            writer
                .write_search(dataset.names(), &target, &result)
                .context("failed to write shapelet result")?;

            let shapelet = result.best.as_ref().map(|best| {
                let origin = best.shapelet.origin();
                ShapeletOutput {
                    source_series: origin
                        .and_then(|o| dataset.name(o.series))
                        .map(ToString::to_string),
                    source_start: origin.map(|o| o.start),
                    n_samples: best.shapelet.len(),
                    split_point: best.split_point,
                    gain: best.gain,
                }
            });

            let evaluation = match result.classifier() {
                Ok(classifier) => {
                    let eval_path = evaluate.unwrap_or_else(|| data.clone());
                    let eval_set = if eval_path == data {
                        None
                    } else {
                        Some(read_curves(&eval_path)?)
                    };
                    let (eval_data, eval_belongs) = match &eval_set {
                        Some(set) => (set, target_membership(set, &state_labels, &target)),
                        None => (&dataset, belongs.clone()),
                    };

                    let distances = classifier.distance_batch(eval_data.curves());
                    let predicted: Vec<ClassLabel> =
                        distances.iter().map(|&d| classifier.label_for(d)).collect();
                    let truth = truth_labels(eval_data, &eval_belongs);
                    writer
                        .write_predictions(eval_data.names(), &predicted, &distances, Some(&truth))
                        .context("failed to write predictions")?;

                    let agreement = accuracy(&predicted, &truth);
                    info!(accuracy = agreement, n = predicted.len(), "classification complete");
                    Some(EvaluationOutput {
                        data: eval_path.display().to_string(),
                        n_series: predicted.len(),
                        n_predicted_belongs: predicted.iter().filter(|l| l.belongs()).count(),
                        accuracy: agreement,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "no shapelet separates the classes; skipping classification");
                    None
                }
            };

            let output = SearchOutput {
                experiment: experiment.as_str().to_string(),
                target,
                n_series: dataset.len(),
                n_belongs: result.class_counts.belongs,
                n_candidates: result.n_candidates,
                n_pruned: result.n_pruned,
                set_entropy: result.set_entropy,
                shapelet,
                evaluation,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
