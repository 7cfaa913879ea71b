//! Contour simplification with a sliding anchor window.
//!
//! A single greedy pass over each contour. The window spans an anchor
//! (`left`) and a probe (`right`); the point just before the probe is the
//! candidate. If the candidate lies farther than the tolerance from the
//! line anchor→probe it becomes the new anchor and is kept, otherwise it
//! is dropped. The probe advances by one either way, so the scan is O(n)
//! with no backtracking.
//!
//! The scan is open-ended: the closing edge from the last point back to
//! the first is never tested, and the last point is kept only if it
//! happens to become an anchor.

use serde::{Deserialize, Serialize};

use crate::distance::distance_to_line;
use crate::maybe_rayon::*;
use crate::types::{Contour, PipelineError, Point};

/// Smallest contour the window can scan: anchor, candidate, probe.
pub const MIN_WINDOW: usize = 3;

/// A validated simplification tolerance in pixels.
///
/// Always non-negative and never NaN. `+inf` is allowed and drops every
/// candidate whose line is well defined.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Validate a raw tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidTolerance`] if `d` is negative or NaN.
    pub fn new(d: f64) -> Result<Self, PipelineError> {
        if d.is_nan() || d < 0.0 {
            return Err(PipelineError::InvalidTolerance(d));
        }
        Ok(Self(d))
    }

    /// The tolerance in pixels.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = PipelineError;

    fn try_from(d: f64) -> Result<Self, Self::Error> {
        Self::new(d)
    }
}

/// Indices of the points the window keeps, in ascending order.
///
/// Contours shorter than [`MIN_WINDOW`] keep every index.
#[must_use]
pub fn retained_indices(points: &[Point], tolerance: Tolerance) -> Vec<usize> {
    if points.len() < MIN_WINDOW {
        return (0..points.len()).collect();
    }

    let d = tolerance.get();
    let mut kept = vec![0];
    let mut left = 0;

    for right in 2..points.len() {
        let candidate = right - 1;
        let dist = distance_to_line(points[left], points[right], points[candidate]);
        if dist > d {
            left = candidate;
            kept.push(left);
        }
    }

    kept
}

/// Simplify a single contour.
///
/// Returns a subsequence of the input points. Contours with fewer than
/// [`MIN_WINDOW`] points are returned unchanged.
#[must_use = "returns the simplified contour"]
pub fn simplify(contour: &Contour, tolerance: Tolerance) -> Contour {
    let points = contour.points();
    if points.len() < MIN_WINDOW {
        return contour.clone();
    }

    retained_indices(points, tolerance)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Simplify every contour independently, preserving order.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidTolerance`] if `tolerance` is negative
/// or NaN. Nothing is simplified in that case.
pub fn simplify_contours(
    contours: &[Contour],
    tolerance: f64,
) -> Result<Vec<Contour>, PipelineError> {
    let tolerance = Tolerance::new(tolerance)?;
    Ok(contours.iter().map(|c| simplify(c, tolerance)).collect())
}

/// Like [`simplify_contours`], but spreads contours across the rayon pool
/// when the `parallel` feature is enabled.
///
/// The output is identical to the sequential version.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidTolerance`] if `tolerance` is negative
/// or NaN.
pub fn simplify_contours_par(
    contours: &[Contour],
    tolerance: f64,
) -> Result<Vec<Contour>, PipelineError> {
    let tolerance = Tolerance::new(tolerance)?;
    Ok(contours
        .par_iter()
        .map(|c| simplify(c, tolerance))
        .collect())
}

/// Point counts before and after a simplification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimplifyStats {
    /// Number of contours processed.
    pub contours: usize,
    /// Total points across all input contours.
    pub points_before: usize,
    /// Total points across all simplified contours.
    pub points_after: usize,
}

impl SimplifyStats {
    /// Tally point counts for matching input and output collections.
    #[must_use]
    pub fn collect(before: &[Contour], after: &[Contour]) -> Self {
        Self {
            contours: before.len(),
            points_before: before.iter().map(Contour::len).sum(),
            points_after: after.iter().map(Contour::len).sum(),
        }
    }

    /// Fraction of points removed, in `[0, 1]`. Zero when there were no
    /// points to begin with.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reduction_ratio(&self) -> f64 {
        if self.points_before == 0 {
            return 0.0;
        }
        1.0 - self.points_after as f64 / self.points_before as f64
    }
}
