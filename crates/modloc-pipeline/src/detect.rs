//! Module detection: pick, grow, and validate a candidate rectangle.
//!
//! Detection is stateless and per-frame. Each call builds and drops its
//! own mask, contour forest and candidate list, so frames may be
//! processed concurrently without coordination.

use image::{GrayImage, RgbImage};

use crate::candidate::candidates;
use crate::contour::ContourForest;
use crate::mask::module_mask;
use crate::rectangle::{CandidateMode, Rectangle};
use crate::types::{
    DetectError, DetectionConfig, DetectionReport, Dimensions, PipelineError, Validation,
};

/// The candidate with the largest area; the first one wins ties.
///
/// # Errors
///
/// Returns [`DetectError::EmptyInput`] if `candidates` is empty.
pub fn select_largest(candidates: &[Rectangle]) -> Result<Rectangle, DetectError> {
    let mut iter = candidates.iter();
    let mut best = *iter.next().ok_or(DetectError::EmptyInput)?;
    for candidate in iter {
        if candidate.area() > best.area() {
            best = *candidate;
        }
    }
    Ok(best)
}

/// Merge every candidate transitively intersecting `target` into it.
///
/// Each pass merges all remaining candidates that intersect the growing
/// accumulator and keeps the rest for the next pass. A candidate that
/// only touches the enlarged accumulator is picked up on a later pass,
/// so the result does not depend on candidate order. Stops after a pass
/// that merges nothing; at most `n` passes over `n` candidates.
#[must_use = "returns the absorbed rectangle"]
pub fn absorb_intersecting(target: Rectangle, candidates: &[Rectangle]) -> Rectangle {
    let mut acc = target;
    let mut remaining = candidates.to_vec();
    let mut pass = 0;
    loop {
        pass += 1;
        let before = remaining.len();
        remaining.retain(|candidate| {
            if acc.intersects(candidate) {
                acc += *candidate;
                false
            } else {
                true
            }
        });
        let absorbed = before - remaining.len();
        tracing::trace!(pass, absorbed, remaining = remaining.len(), %acc, "absorption pass");
        if absorbed == 0 {
            return acc;
        }
    }
}

/// Measure `rect` against the frame and apply the acceptance bounds.
#[must_use]
pub fn evaluate(rect: &Rectangle, frame: Dimensions, config: &DetectionConfig) -> Validation {
    let (width, height) = (f64::from(frame.width), f64::from(frame.height));
    let span = width + height;
    let (cx, cy) = rect.center();

    let centered_distance =
        ((f64::from(cx) - width / 2.0).abs() + (f64::from(cy) - height / 2.0).abs()) / span;
    let relative_size = (f64::from(rect.width()) + f64::from(rect.height())) / span;

    let accepted = config.min_relative_size < relative_size
        && relative_size < config.max_relative_size
        && centered_distance < config.max_centered_distance;

    Validation {
        centered_distance,
        relative_size,
        accepted,
    }
}

/// Locate the module in an already-built mask.
///
/// Returns `Ok(None)` when the mask holds no candidate or the merged
/// candidate fails validation.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] for an invalid `config`.
pub fn find_module_in_mask(
    mask: &GrayImage,
    config: &DetectionConfig,
) -> Result<Option<Rectangle>, PipelineError> {
    Ok(inspect_mask(mask, config)?.detection)
}

/// Locate the module in an RGB frame.
///
/// The frame is median-blurred, thresholded against every configured
/// HSV band, dilated, and then searched as in [`find_module_in_mask`].
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] for an invalid `config`.
pub fn find_module(
    frame: &RgbImage,
    config: &DetectionConfig,
) -> Result<Option<Rectangle>, PipelineError> {
    Ok(inspect_frame(frame, config)?.detection)
}

/// Like [`find_module`], but report every intermediate decision.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] for an invalid `config`.
pub fn inspect_frame(
    frame: &RgbImage,
    config: &DetectionConfig,
) -> Result<DetectionReport, PipelineError> {
    config.validate()?;
    let mask = module_mask(frame, config)?;
    locate(&mask, config)
}

/// Like [`find_module_in_mask`], but report every intermediate decision.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] for an invalid `config`.
pub fn inspect_mask(
    mask: &GrayImage,
    config: &DetectionConfig,
) -> Result<DetectionReport, PipelineError> {
    config.validate()?;
    locate(mask, config)
}

fn locate(mask: &GrayImage, config: &DetectionConfig) -> Result<DetectionReport, PipelineError> {
    let dimensions = Dimensions::of(mask);
    let forest = ContourForest::extract(mask, config.contour_mode);
    let boxes = candidates(&forest, CandidateMode::Bound)?;

    let mut report = DetectionReport {
        dimensions,
        candidate_count: boxes.len(),
        best: None,
        absorbed: None,
        validation: None,
        detection: None,
    };
    if boxes.is_empty() {
        tracing::debug!("no candidates");
        return Ok(report);
    }

    let best = select_largest(&boxes)?;
    let absorbed = absorb_intersecting(best, &boxes);
    let validation = evaluate(&absorbed, dimensions, config);

    tracing::debug!(
        candidates = boxes.len(),
        %best,
        %absorbed,
        relative_size = validation.relative_size,
        centered_distance = validation.centered_distance,
        accepted = validation.accepted,
        "evaluated module candidate"
    );

    report.best = Some(best);
    report.absorbed = Some(absorbed);
    report.validation = Some(validation);
    report.detection = validation.accepted.then_some(absorbed);
    Ok(report)
}
