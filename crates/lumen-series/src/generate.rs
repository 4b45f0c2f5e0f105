//! Lazy enumeration of gap-free shapelet candidates.

use std::iter::FusedIterator;

use tracing::instrument;

use crate::error::SeriesError;
use crate::gap::GapModel;
use crate::record::SeriesId;
use crate::series::LightCurve;
use crate::shapelet::{Shapelet, ShapeletOrigin};

/// Iterator over every gap-free window of a light curve whose duration lies
/// in `[min_duration, max_duration]`.
///
/// Windows are visited by step count `l` ascending, then start index
/// ascending. A window of `l` steps holds `l + 1` samples and is emitted only
/// if it spans exactly `l * time_res` seconds (see [`GapModel`]). Windows that
/// straddle a gap are skipped silently. The iterator borrows the light curve
/// and is cheap to clone, so a fresh pass can be started at any time.
#[derive(Debug, Clone)]
pub struct ShapeletGenerator<'a> {
    series: &'a LightCurve,
    series_id: SeriesId,
    gap: GapModel,
    steps: usize,
    max_steps: usize,
    start: usize,
    exhausted: bool,
}

impl<'a> ShapeletGenerator<'a> {
    /// Create a generator over `series`.
    ///
    /// Step bounds are `floor(min_duration / time_res)` and
    /// `floor(max_duration / time_res)`; the upper bound is capped at
    /// `series.len() - 1`, beyond which no window fits. An inverted range
    /// produces an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidDuration`] if either bound is negative or
    /// non-finite.
    pub fn new(
        series: &'a LightCurve,
        series_id: SeriesId,
        min_duration: f64,
        max_duration: f64,
        gap: GapModel,
    ) -> Result<Self, SeriesError> {
        let min_steps = gap.steps(min_duration)?;
        let max_steps = gap.steps(max_duration)?.min(series.len().saturating_sub(1));
        Ok(Self {
            series,
            series_id,
            gap,
            steps: min_steps,
            max_steps,
            start: 0,
            exhausted: min_steps > max_steps,
        })
    }

    /// Return the series the candidates are drawn from.
    #[must_use]
    pub fn series_id(&self) -> SeriesId {
        self.series_id
    }
}

impl Iterator for ShapeletGenerator<'_> {
    type Item = Shapelet;

    fn next(&mut self) -> Option<Self::Item> {
        let times = self.series.times();
        let n = times.len();
        while !self.exhausted {
            let end = self.start + self.steps;
            if end >= n {
                if self.steps == self.max_steps {
                    self.exhausted = true;
                    break;
                }
                self.steps += 1;
                self.start = 0;
                continue;
            }
            let start = self.start;
            self.start += 1;
            if self.gap.is_contiguous(times, start, end) {
                let origin = ShapeletOrigin {
                    series: self.series_id,
                    start,
                };
                return Some(Shapelet::from_window(
                    &self.series.values()[start..=end],
                    origin,
                ));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let n = self.series.len();
        // Windows left at the current step count plus every later step count.
        let current = n.saturating_sub(self.start + self.steps);
        let later: usize = (self.steps + 1..=self.max_steps).map(|l| n - l).sum();
        (0, Some(current + later))
    }
}

impl FusedIterator for ShapeletGenerator<'_> {}

/// Enumerate all gap-free shapelets of `series` with duration in
/// `[min_duration, max_duration]` at resolution `time_res`.
///
/// Uses the default gap tolerance of `time_res / 2`. An empty sequence is a
/// valid result, for example when `min_duration` exceeds the series duration.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SeriesError::InvalidResolution`] | `time_res` is not finite and positive |
/// | [`SeriesError::InvalidDuration`] | A duration bound is negative or non-finite |
#[instrument(skip(series), fields(n = series.len()))]
pub fn generate_shapelets(
    series: &LightCurve,
    min_duration: f64,
    max_duration: f64,
    time_res: f64,
) -> Result<ShapeletGenerator<'_>, SeriesError> {
    let gap = GapModel::new(time_res)?;
    ShapeletGenerator::new(series, SeriesId::new(0), min_duration, max_duration, gap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular(values: Vec<f64>) -> LightCurve {
        LightCurve::regular(0.0, 1.0, values).unwrap()
    }

    #[test]
    fn uniform_series_yields_len_minus_l_per_length() {
        let lc = regular(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let all: Vec<Shapelet> = generate_shapelets(&lc, 2.0, 4.0, 1.0).unwrap().collect();
        for l in 2..=4 {
            let count = all.iter().filter(|s| s.len() == l + 1).count();
            assert_eq!(count, lc.len() - l, "step count {l}");
        }
        assert_eq!(all.len(), 4 + 3 + 2);
    }

    #[test]
    fn candidates_are_ordered_by_length_then_start() {
        let lc = regular(vec![1.0, 2.0, 3.0, 4.0]);
        let all: Vec<Shapelet> = generate_shapelets(&lc, 1.0, 2.0, 1.0).unwrap().collect();
        let values: Vec<Vec<f64>> = all.iter().map(|s| s.values().to_vec()).collect();
        assert_eq!(
            values,
            vec![
                vec![1.0, 2.0],
                vec![2.0, 3.0],
                vec![3.0, 4.0],
                vec![1.0, 2.0, 3.0],
                vec![2.0, 3.0, 4.0],
            ]
        );
        assert_eq!(all[4].origin().unwrap().start, 1);
    }

    #[test]
    fn windows_straddling_gap_are_absent() {
        // Gap between t=2 and t=5.
        let lc = LightCurve::new(
            vec![0.0, 1.0, 2.0, 5.0, 6.0, 7.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap();
        let all: Vec<Shapelet> = generate_shapelets(&lc, 2.0, 2.0, 1.0).unwrap().collect();
        let starts: Vec<usize> = all.iter().map(|s| s.origin().unwrap().start).collect();
        assert_eq!(starts, vec![0, 3]);
    }

    #[test]
    fn min_duration_beyond_series_is_empty() {
        let lc = regular(vec![1.0, 2.0, 3.0]);
        let mut shapelets = generate_shapelets(&lc, 10.0, 20.0, 1.0).unwrap();
        assert!(shapelets.next().is_none());
    }

    #[test]
    fn inverted_range_is_empty() {
        let lc = regular(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(generate_shapelets(&lc, 3.0, 1.0, 1.0).unwrap().count(), 0);
    }

    #[test]
    fn zero_min_duration_yields_single_samples() {
        let lc = regular(vec![7.0, 8.0]);
        let all: Vec<Shapelet> = generate_shapelets(&lc, 0.0, 0.0, 1.0).unwrap().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].values(), &[8.0]);
    }

    #[test]
    fn fractional_resolution_scales_sample_count() {
        let lc = LightCurve::regular(0.0, 0.5, vec![0.0; 6]).unwrap();
        let all: Vec<Shapelet> = generate_shapelets(&lc, 2.0, 2.0, 0.5).unwrap().collect();
        assert!(all.iter().all(|s| s.len() == 5));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn generator_is_restartable() {
        let lc = regular(vec![1.0, 2.0, 3.0, 4.0]);
        let generator = generate_shapelets(&lc, 1.0, 3.0, 1.0).unwrap();
        let first: Vec<Shapelet> = generator.clone().collect();
        let second: Vec<Shapelet> = generator.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn size_hint_bounds_uniform_count() {
        let lc = regular(vec![0.0; 10]);
        let generator = generate_shapelets(&lc, 3.0, 5.0, 1.0).unwrap();
        let (_, upper) = generator.size_hint();
        assert_eq!(upper, Some(7 + 6 + 5));
        assert_eq!(generator.count(), 18);
    }

    #[test]
    fn rejects_negative_duration() {
        let lc = regular(vec![1.0, 2.0]);
        assert!(matches!(
            generate_shapelets(&lc, -1.0, 1.0, 1.0),
            Err(SeriesError::InvalidDuration { .. })
        ));
    }
}
