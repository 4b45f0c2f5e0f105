//! Light curves, gap-aware shapelet generation, and subsequence distance.
//!
//! Pure math library with zero I/O. Provides validated light curves, the
//! fixed-resolution gap model, lazy enumeration of gap-free shapelet
//! candidates, and nearest-subsequence distance with early abandonment.

mod distance;
mod error;
mod gap;
mod generate;
mod record;
mod series;
mod shapelet;

pub use distance::{DistanceEvaluator, EarlyAbandon, evaluate_distance};
pub use error::SeriesError;
pub use gap::GapModel;
pub use generate::{ShapeletGenerator, generate_shapelets};
pub use record::{ClassLabel, ClassMembership, DistanceRecord, SeriesId};
pub use series::LightCurve;
pub use shapelet::{Shapelet, ShapeletOrigin};
