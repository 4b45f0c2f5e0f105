//! Minimum-distance decision rule built from a winning shapelet.

use rayon::prelude::*;

use lumen_series::{ClassLabel, DistanceEvaluator, LightCurve, Shapelet};
use lumen_split::ClassCounts;

use crate::result::BestShapelet;

/// Two-way classifier: a light curve is labelled by which side of the
/// threshold its nearest distance to the shapelet falls on.
///
/// A light curve with no valid alignment is infinitely far and always lands
/// at-or-above the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeletClassifier {
    shapelet: Shapelet,
    threshold: f64,
    below: ClassLabel,
    evaluator: DistanceEvaluator,
}

impl ShapeletClassifier {
    /// Create a classifier labelling distances below `threshold` as `below`.
    #[must_use]
    pub fn new(
        shapelet: Shapelet,
        threshold: f64,
        below: ClassLabel,
        evaluator: DistanceEvaluator,
    ) -> Self {
        Self {
            shapelet,
            threshold,
            below,
            evaluator,
        }
    }

    /// Orient a classifier from a search winner.
    ///
    /// The side whose training records hold the larger class-1 proportion is
    /// labelled [`ClassLabel::Belongs`]; equal proportions favour below.
    #[must_use]
    pub fn from_best(best: &BestShapelet, evaluator: DistanceEvaluator) -> Self {
        let mut below = ClassCounts::default();
        let mut above = ClassCounts::default();
        for record in &best.records {
            if record.distance < best.split_point {
                below.add(record.label);
            } else {
                above.add(record.label);
            }
        }
        let p_below = below.proportion().unwrap_or(0.0);
        let p_above = above.proportion().unwrap_or(0.0);
        let below_label = if p_below >= p_above {
            ClassLabel::Belongs
        } else {
            ClassLabel::Other
        };
        Self::new(best.shapelet.clone(), best.split_point, below_label, evaluator)
    }

    /// Return the shapelet.
    #[must_use]
    pub fn shapelet(&self) -> &Shapelet {
        &self.shapelet
    }

    /// Return the distance threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Return the label assigned to distances below the threshold.
    #[must_use]
    pub fn below_label(&self) -> ClassLabel {
        self.below
    }

    /// Return the nearest distance from the shapelet to `series`.
    #[must_use]
    pub fn distance(&self, series: &LightCurve) -> f64 {
        self.evaluator.nearest(series, &self.shapelet)
    }

    /// Nearest distances for many light curves in parallel, preserving input order.
    #[must_use]
    pub fn distance_batch(&self, curves: &[LightCurve]) -> Vec<f64> {
        curves.par_iter().map(|c| self.distance(c)).collect()
    }

    /// Label an already computed nearest distance.
    #[must_use]
    pub fn label_for(&self, distance: f64) -> ClassLabel {
        if distance < self.threshold {
            self.below
        } else {
            self.below.opposite()
        }
    }

    /// Classify one light curve.
    #[must_use]
    pub fn classify(&self, series: &LightCurve) -> ClassLabel {
        self.label_for(self.distance(series))
    }

    /// Classify many light curves in parallel, preserving input order.
    #[must_use]
    pub fn classify_batch(&self, curves: &[LightCurve]) -> Vec<ClassLabel> {
        curves.par_iter().map(|c| self.classify(c)).collect()
    }
}
