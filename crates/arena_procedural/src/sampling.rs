//! # Sampling Helpers
//!
//! Every range used by generation goes through these helpers so an empty or
//! inverted range (a margin wider than a tiny arena, a hand-edited config)
//! degrades to "skip" or "use the minimum" instead of panicking inside
//! `gen_range`.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range a generation parameter is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    /// Smallest value that can be drawn.
    pub min: T,
    /// Largest value that can be drawn.
    pub max: T,
}

impl<T: Copy + PartialOrd> Span<T> {
    /// Creates a new span.
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Returns true if `min > max` (or the bounds are not comparable).
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        !(self.min <= self.max)
    }

    /// Returns true if `value` lies within the span.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Span<usize> {
    /// Draws a value uniformly from `[min, max]`.
    ///
    /// An inverted span yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if self.min < self.max {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

impl Span<f32> {
    /// Draws a value uniformly from `[min, max]`.
    ///
    /// An inverted or non-finite span yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min < self.max && (self.max - self.min).is_finite() {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Draws a coordinate uniformly from `[lo, hi)`.
///
/// Returns `None` when the interval is empty or not finite.
pub fn sample_between<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> Option<f32> {
    if lo < hi && (hi - lo).is_finite() {
        Some(rng.gen_range(lo..hi))
    } else {
        None
    }
}

/// Draws a grid index from `[margin, len - margin)`.
///
/// Returns `None` when the axis is too short to honor the margin.
pub fn sample_index<R: Rng + ?Sized>(rng: &mut R, len: usize, margin: usize) -> Option<usize> {
    let hi = len.checked_sub(margin)?;
    if margin < hi {
        Some(rng.gen_range(margin..hi))
    } else {
        None
    }
}

/// Bernoulli trial that tolerates out-of-range probabilities.
///
/// `p >= 1` always succeeds without consuming randomness, `p <= 0` (or NaN)
/// always fails.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p >= 1.0 {
        true
    } else if p > 0.0 {
        rng.gen_bool(p)
    } else {
        false
    }
}
