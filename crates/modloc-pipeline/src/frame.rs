//! Frame decoding and color conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces an RGB
//! frame. HSV conversion follows the 8-bit convention used by common
//! vision libraries: hue is stored in half-degrees so it fits a byte.

use image::{Rgb, RgbImage};

use crate::types::PipelineError;

/// Decode raw image bytes into an RGB frame.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_frame(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

/// Convert one RGB pixel to 8-bit HSV.
///
/// `V = max(R, G, B)`, `S = 255 * (V - min) / V`, and `H` is the hue
/// angle in degrees halved (`0..=179`). Grays have `H = S = 0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0;
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = f32::from(v - min);

    let s = if v == 0 {
        0.0
    } else {
        255.0 * delta / f32::from(v)
    };

    let h = if delta == 0.0 {
        0.0
    } else {
        let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
        let degrees = if v == pixel.0[0] {
            60.0 * (g - b) / delta
        } else if v == pixel.0[1] {
            60.0f32.mul_add((b - r) / delta, 120.0)
        } else {
            60.0f32.mul_add((r - g) / delta, 240.0)
        };
        if degrees < 0.0 { degrees + 360.0 } else { degrees }
    };

    [
        ((h / 2.0).round() as u8).min(179),
        s.round().clamp(0.0, 255.0) as u8,
        v,
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_error() {
        assert!(matches!(decode_frame(&[]), Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_returns_image_decode_error() {
        let result = decode_frame(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn valid_png_decodes_to_rgb() {
        let img = RgbImage::from_fn(3, 2, |x, _| Rgb([0, 100, u8::try_from(x).unwrap()]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();

        let decoded = decode_frame(&buf).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn grays_have_no_hue_or_saturation() {
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 0])), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(Rgb([200, 200, 200])), [0, 0, 200]);
        assert_eq!(rgb_to_hsv(Rgb([255, 255, 255])), [0, 0, 255]);
    }

    #[test]
    fn primaries_map_to_half_degree_hues() {
        assert_eq!(rgb_to_hsv(Rgb([255, 0, 0])), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(Rgb([0, 255, 0])), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 255])), [120, 255, 255]);
    }

    #[test]
    fn off_axis_hues_match_common_8bit_convention() {
        // Reference values from the usual 8-bit RGB -> HSV conversion.
        assert_eq!(rgb_to_hsv(Rgb([255, 128, 0])), [15, 255, 255]);
        assert_eq!(rgb_to_hsv(Rgb([50, 200, 120])), [74, 191, 200]);
        assert_eq!(rgb_to_hsv(Rgb([30, 60, 90])), [105, 170, 90]);
        assert_eq!(rgb_to_hsv(Rgb([210, 100, 150])), [166, 134, 210]);
    }

    #[test]
    fn negative_hue_wraps() {
        // Magenta-ish red: hue just below 360 degrees.
        let [h, _, _] = rgb_to_hsv(Rgb([255, 0, 10]));
        assert!(h >= 175, "got {h}");
    }

    #[test]
    fn slightly_tinted_white_has_low_saturation() {
        let [_, s, v] = rgb_to_hsv(Rgb([200, 198, 197]));
        assert_eq!(v, 200);
        assert!(s <= 5, "got {s}");
    }
}
