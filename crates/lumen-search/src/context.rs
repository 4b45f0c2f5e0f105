//! Shared incumbent for concurrent candidate scoring.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use lumen_series::SeriesId;

use crate::result::BestShapelet;

/// Stable position of a candidate in enumeration order: source series, then
/// index within that series' generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateKey {
    /// Series the candidate was drawn from.
    pub series: SeriesId,
    /// Position within that series' candidate sequence.
    pub index: usize,
}

/// Best candidate seen so far, shared by reference across workers.
///
/// The incumbent is written at most once per fully scored candidate, under a
/// lock. Its gain is mirrored in an atomic so pruning can read it without
/// locking. The gain never decreases, so a read can be stale only by being too
/// low, which delays pruning but never over-prunes.
#[derive(Debug, Default)]
pub struct SearchContext {
    best: Mutex<Option<BestShapelet>>,
    gain_bits: AtomicU64,
    n_candidates: AtomicUsize,
    n_pruned: AtomicUsize,
}

impl SearchContext {
    /// Create an empty context with incumbent gain 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the gain of the current incumbent, or 0 if there is none.
    #[must_use]
    pub fn incumbent_gain(&self) -> f64 {
        f64::from_bits(self.gain_bits.load(Ordering::Acquire))
    }

    /// Offer a fully scored candidate. Returns true if it became the incumbent.
    ///
    /// A candidate replaces the incumbent when its gain is strictly higher, or
    /// equal with a smaller [`CandidateKey`]. Zero-gain candidates never win.
    pub fn offer(&self, candidate: BestShapelet) -> bool {
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        let wins = match best.as_ref() {
            None => candidate.gain > 0.0,
            Some(current) => {
                candidate.gain > current.gain
                    || (candidate.gain == current.gain && candidate.key < current.key)
            }
        };
        if wins {
            self.gain_bits.store(candidate.gain.to_bits(), Ordering::Release);
            *best = Some(candidate);
        }
        wins
    }

    /// Count one generated candidate.
    pub(crate) fn record_candidate(&self) {
        self.n_candidates.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one pruned candidate.
    pub(crate) fn record_pruned(&self) {
        self.n_pruned.fetch_add(1, Ordering::Relaxed);
    }

    /// Return the number of candidates counted so far.
    #[must_use]
    pub fn n_candidates(&self) -> usize {
        self.n_candidates.load(Ordering::Relaxed)
    }

    /// Return the number of pruned candidates counted so far.
    #[must_use]
    pub fn n_pruned(&self) -> usize {
        self.n_pruned.load(Ordering::Relaxed)
    }

    /// Consume the context and return the final incumbent.
    #[must_use]
    pub fn into_best(self) -> Option<BestShapelet> {
        self.best.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
