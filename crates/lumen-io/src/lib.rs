//! File I/O, validation, and serialization for the lumen pipeline.

mod domain;
mod error;
mod labels;
mod membership;
mod reader;
mod writer;

pub use domain::{ExperimentName, LightCurveDataset, SeriesName};
pub use error::IoError;
pub use labels::{LabelReader, StateLabels};
pub use membership::target_membership;
pub use reader::LightCurveReader;
pub use writer::{ResultWriter, accuracy};
