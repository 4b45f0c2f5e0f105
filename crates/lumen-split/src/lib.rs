//! Entropy-based split selection for shapelet candidates.
//!
//! Binary entropy, information gain of a distance threshold, exhaustive
//! threshold search over a candidate's distance records, and the optimistic
//! entropy bounds used to abandon candidates early.

mod entropy;
mod error;
mod gain;
mod prune;
mod threshold;

pub use entropy::{ClassCounts, entropy, set_entropy};
pub use error::{InvalidSplitPoint, Partition};
pub use gain::information_gain;
pub use prune::{gain_upper_bound, should_prune};
pub use threshold::{SplitOutcome, best_split, best_split_sorted};
