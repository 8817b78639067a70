//! modloc-pipeline: module detection in video frames (sans-IO).
//!
//! Finds a near-white rectangular module of known size near the center
//! of a frame through:
//! median blur -> HSV band masks -> dilation -> contour extraction ->
//! bounding-box candidates -> largest candidate -> absorption of
//! intersecting candidates -> size/position validation.
//!
//! This crate has **no I/O dependencies**: it operates on in-memory
//! frames and masks and returns structured data. Reading frames from
//! disk lives in `modloc-bench`.

pub mod candidate;
pub mod contour;
pub mod detect;
pub mod frame;
pub mod mask;
pub mod rectangle;
pub mod simplify;
pub mod types;

pub use contour::{BorderKind, Contour, ContourForest, ContourId, ContourMode, HullOrientation};
pub use detect::{
    absorb_intersecting, evaluate, find_module, find_module_in_mask, inspect_frame, inspect_mask,
    select_largest,
};
pub use rectangle::{CandidateMode, Rectangle};
pub use types::{
    ContourError, DetectError, DetectionConfig, DetectionReport, Dimensions, GeometryError,
    HsvBand, PipelineError, Validation,
};

/// Decode raw image bytes and run detection on the resulting frame.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `frame_bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is unrecognized.
/// Returns [`PipelineError::InvalidConfig`] if `config` is invalid.
pub fn process(
    frame_bytes: &[u8],
    config: &DetectionConfig,
) -> Result<DetectionReport, PipelineError> {
    let frame = frame::decode_frame(frame_bytes)?;
    inspect_frame(&frame, config)
}
