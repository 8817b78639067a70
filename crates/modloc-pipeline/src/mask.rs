//! Binary masks: color selection, union, and morphology.
//!
//! Masks are `GrayImage`s holding 255 for selected pixels and 0
//! elsewhere. The heavy lifting (median filter, dilation) is done by
//! `imageproc`; this module only wires the steps together.

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;

use crate::frame::rgb_to_hsv;
use crate::types::{Dimensions, DetectionConfig, HsvBand, PipelineError};

const SELECTED: Luma<u8> = Luma([255]);
const CLEAR: Luma<u8> = Luma([0]);

/// Select pixels whose HSV value lies inside `band` (inclusive).
#[must_use = "returns the band mask"]
pub fn hsv_range(frame: &RgbImage, band: &HsvBand) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        if band.contains(rgb_to_hsv(*frame.get_pixel(x, y))) {
            SELECTED
        } else {
            CLEAR
        }
    })
}

/// Pixelwise logical OR of two masks.
///
/// # Errors
///
/// Returns [`PipelineError::DimensionMismatch`] if the masks differ in
/// size.
pub fn union(a: &GrayImage, b: &GrayImage) -> Result<GrayImage, PipelineError> {
    if a.dimensions() != b.dimensions() {
        return Err(PipelineError::DimensionMismatch {
            a: Dimensions::of(a),
            b: Dimensions::of(b),
        });
    }
    Ok(GrayImage::from_fn(a.width(), a.height(), |x, y| {
        if a.get_pixel(x, y).0[0] > 0 || b.get_pixel(x, y).0[0] > 0 {
            SELECTED
        } else {
            CLEAR
        }
    }))
}

/// Grow selected regions by `radius` pixels with a square structuring
/// element (side `2 * radius + 1`). A zero radius returns the mask
/// unchanged.
#[must_use = "returns the dilated mask"]
pub fn dilate(mask: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return mask.clone();
    }
    imageproc::morphology::dilate(mask, Norm::LInf, radius)
}

/// Median-filter each channel over a `(2 * radius + 1)` square window.
/// A zero radius returns the frame unchanged.
#[must_use = "returns the blurred frame"]
pub fn median_blur(frame: &RgbImage, radius: u32) -> RgbImage {
    if radius == 0 {
        return frame.clone();
    }
    imageproc::filter::median_filter(frame, radius, radius)
}

/// Build the module mask for a frame: median blur, union of every
/// configured color band, then dilation.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] if `config` has no color
/// bands.
pub fn module_mask(frame: &RgbImage, config: &DetectionConfig) -> Result<GrayImage, PipelineError> {
    let blurred = median_blur(frame, config.median_radius);

    let mut bands = config.color_bands.iter();
    let first = bands.next().ok_or_else(|| {
        PipelineError::InvalidConfig("at least one color band is required".to_owned())
    })?;
    let mut selected = hsv_range(&blurred, first);
    for band in bands {
        selected = union(&selected, &hsv_range(&blurred, band))?;
    }

    let mask = dilate(&selected, config.dilate_radius);
    tracing::debug!(
        width = mask.width(),
        height = mask.height(),
        selected = mask.pixels().filter(|p| p.0[0] > 0).count(),
        "built module mask"
    );
    Ok(mask)
}
