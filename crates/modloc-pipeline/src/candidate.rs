//! Candidate extraction: one rectangle per contour.

use crate::contour::ContourForest;
use crate::rectangle::{CandidateMode, Rectangle};
use crate::types::GeometryError;

/// Derive one candidate per contour, in forest order.
///
/// # Errors
///
/// With [`CandidateMode::Bound`], fails only on a contour without
/// points. With [`CandidateMode::Average`], fails on any contour that
/// is not exactly four points.
pub fn candidates(
    forest: &ContourForest,
    mode: CandidateMode,
) -> Result<Vec<Rectangle>, GeometryError> {
    forest
        .into_iter()
        .map(|contour| Rectangle::from_contour(contour, mode))
        .collect()
}

/// Approximate each contour by a polygon and keep the quadrilaterals as
/// four-corner candidates. Contours that do not reduce to four vertices
/// are skipped.
#[must_use]
pub fn quad_candidates(forest: &ContourForest, tolerance_fraction: f64) -> Vec<Rectangle> {
    forest
        .into_iter()
        .map(|contour| contour.approximate_polygon(tolerance_fraction, true))
        .filter_map(|quad| Rectangle::from_contour(&quad, CandidateMode::Average).ok())
        .collect()
}
