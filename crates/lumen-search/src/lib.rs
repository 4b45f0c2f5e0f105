//! Shapelet search over a labelled light curve dataset.
//!
//! Enumerates gap-free candidates from every light curve, scores each one by
//! the information gain of its best distance threshold, abandons candidates
//! that the entropy pruning bound rules out, and keeps the global best in a
//! shared incumbent. The winner becomes a minimum-distance classifier.

mod classifier;
mod config;
mod context;
mod error;
mod result;
mod search;

pub use classifier::ShapeletClassifier;
pub use config::{Parallelism, PruningMode, SearchConfig};
pub use context::{CandidateKey, SearchContext};
pub use error::SearchError;
pub use result::{BestShapelet, SearchResult};
