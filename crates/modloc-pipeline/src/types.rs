//! Shared types for the modloc detection pipeline.

use serde::{Deserialize, Serialize};

use crate::contour::ContourMode;
use crate::rectangle::Rectangle;

/// Re-export `GrayImage` so downstream crates can reference masks
/// without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` so downstream crates can pass frames without
/// depending on `image` directly.
pub use image::RgbImage;

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn of(image: &GrayImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// An inclusive HSV range, in 8-bit HSV: hue in half-degrees
/// (`0..=179`), saturation and value in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvBand {
    pub low: [u8; 3],
    pub high: [u8; 3],
}

impl HsvBand {
    #[must_use]
    pub const fn new(low: [u8; 3], high: [u8; 3]) -> Self {
        Self { low, high }
    }

    /// Whether `hsv` lies inside the band on every channel.
    #[must_use]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.low[c] <= hsv[c] && hsv[c] <= self.high[c])
    }
}

/// Configuration for module detection.
///
/// Defaults are tuned for a matte near-white module filling a fifth to
/// a half of the frame and sitting at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Median blur radius; the window is `2 * radius + 1` pixels square.
    /// Zero disables the blur.
    pub median_radius: u32,

    /// HSV bands whose masks are unioned to select module pixels.
    pub color_bands: Vec<HsvBand>,

    /// Dilation radius with a square structuring element; closes gaps
    /// between fragments of the module. Zero disables dilation.
    pub dilate_radius: u8,

    /// Which contours become candidates.
    pub contour_mode: ContourMode,

    /// Lower bound (exclusive) on `(width + height) / (frame_w + frame_h)`.
    pub min_relative_size: f64,

    /// Upper bound (exclusive) on the relative size.
    pub max_relative_size: f64,

    /// Upper bound (exclusive) on the normalized L1 distance between the
    /// detection center and the frame center.
    pub max_centered_distance: f64,
}

impl DetectionConfig {
    pub const DEFAULT_MEDIAN_RADIUS: u32 = 9;
    pub const DEFAULT_DILATE_RADIUS: u8 = 5;
    pub const DEFAULT_MIN_RELATIVE_SIZE: f64 = 0.2;
    pub const DEFAULT_MAX_RELATIVE_SIZE: f64 = 0.5;
    pub const DEFAULT_MAX_CENTERED_DISTANCE: f64 = 0.01;

    /// Bright and dim faces of the module: both nearly unsaturated.
    pub const DEFAULT_COLOR_BANDS: [HsvBand; 2] = [
        HsvBand::new([0, 0, 190], [255, 5, 210]),
        HsvBand::new([0, 0, 125], [255, 10, 145]),
    ];

    /// Check the invariants the detector relies on.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] when no color band is
    /// configured, a band's low bound exceeds its high bound, or the
    /// acceptance thresholds are not finite, ordered, and non-negative.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.color_bands.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one color band is required".to_owned(),
            ));
        }
        if let Some(band) = self
            .color_bands
            .iter()
            .find(|b| (0..3).any(|c| b.low[c] > b.high[c]))
        {
            return Err(PipelineError::InvalidConfig(format!(
                "color band low {:?} exceeds high {:?}",
                band.low, band.high
            )));
        }
        let thresholds = [
            self.min_relative_size,
            self.max_relative_size,
            self.max_centered_distance,
        ];
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(PipelineError::InvalidConfig(
                "thresholds must be finite and non-negative".to_owned(),
            ));
        }
        if self.min_relative_size >= self.max_relative_size {
            return Err(PipelineError::InvalidConfig(format!(
                "min_relative_size ({}) must be below max_relative_size ({})",
                self.min_relative_size, self.max_relative_size
            )));
        }
        Ok(())
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            median_radius: Self::DEFAULT_MEDIAN_RADIUS,
            color_bands: Self::DEFAULT_COLOR_BANDS.to_vec(),
            dilate_radius: Self::DEFAULT_DILATE_RADIUS,
            contour_mode: ContourMode::default(),
            min_relative_size: Self::DEFAULT_MIN_RELATIVE_SIZE,
            max_relative_size: Self::DEFAULT_MAX_RELATIVE_SIZE,
            max_centered_distance: Self::DEFAULT_MAX_CENTERED_DISTANCE,
        }
    }
}

/// Size and position metrics of a merged rectangle relative to its frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    /// `(|cx - w/2| + |cy - h/2|) / (w + h)`.
    pub centered_distance: f64,
    /// `(width + height) / (w + h)`.
    pub relative_size: f64,
    /// Whether both metrics fall inside the configured bounds.
    pub accepted: bool,
}

/// Everything the detector decided for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub dimensions: Dimensions,
    /// Number of candidate rectangles extracted from the mask.
    pub candidate_count: usize,
    /// Largest candidate (`None` when there were no candidates).
    pub best: Option<Rectangle>,
    /// `best` after absorbing every transitively intersecting candidate.
    pub absorbed: Option<Rectangle>,
    pub validation: Option<Validation>,
    /// The accepted module, if any.
    pub detection: Option<Rectangle>,
}

/// Rectangle construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// Corner coordinates are out of order.
    #[error("invalid rectangle ({x1}, {y1}, {x2}, {y2}): need x1 <= x2 and y1 <= y2")]
    InvalidGeometry { x1: i32, y1: i32, x2: i32, y2: i32 },

    /// A coordinate lies outside the supported range.
    #[error("rectangle ({x1}, {y1}, {x2}, {y2}) exceeds the supported coordinate range")]
    OutOfRange { x1: i32, y1: i32, x2: i32, y2: i32 },

    /// Four-corner construction got the wrong number of points.
    #[error("expected exactly 4 corner points, got {0}")]
    CornerCount(usize),

    /// A bounding box was requested for no points.
    #[error("cannot bound an empty point set")]
    EmptyPointSet,
}

/// Candidate selection errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectError {
    /// No candidates to select from.
    #[error("no candidate rectangles to select from")]
    EmptyInput,
}

/// Raw contour hierarchy errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContourError {
    #[error("hierarchy has {hierarchy} entries for {contours} contours")]
    LengthMismatch { contours: usize, hierarchy: usize },

    #[error("contour {contour} links to out-of-range index {index}")]
    IndexOutOfRange { contour: usize, index: i32 },

    #[error("link chain starting at contour {contour} loops")]
    Cycle { contour: usize },
}

/// Errors that can occur while detecting a module.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input frame.
    #[error("failed to decode frame: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input frame bytes were empty.
    #[error("input frame data is empty")]
    EmptyInput,

    /// Detection configuration is invalid.
    #[error("invalid detection configuration: {0}")]
    InvalidConfig(String),

    /// Two masks that must be combined differ in size.
    #[error("mask dimensions differ: {a:?} vs {b:?}")]
    DimensionMismatch { a: Dimensions, b: Dimensions },

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error(transparent)]
    Contour(#[from] ContourError),
}
