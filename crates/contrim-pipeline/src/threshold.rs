//! Binary thresholding.
//!
//! Wraps [`imageproc::contrast::threshold`] to produce the two-level image
//! that contour tracing expects: white pixels (255) are foreground, black
//! pixels (0) are background.

use image::GrayImage;
use imageproc::contrast::ThresholdType;

/// Foreground value written by [`binary_threshold`].
pub const FOREGROUND: u8 = 255;

/// Classic binary threshold: values strictly above `threshold` become
/// [`FOREGROUND`], everything else becomes 0.
///
/// With `invert` the two levels swap, so dark shapes on a light
/// background become foreground. A threshold of 255 yields an all-black
/// image (all-white when inverted).
#[must_use = "returns the binary image"]
pub fn binary_threshold(image: &GrayImage, threshold: u8, invert: bool) -> GrayImage {
    let kind = if invert {
        ThresholdType::BinaryInverted
    } else {
        ThresholdType::Binary
    };
    imageproc::contrast::threshold(image, threshold, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1-pixel-high gradient 0, 1, ..., 255.
    fn ramp() -> GrayImage {
        GrayImage::from_fn(256, 1, |x, _| {
            image::Luma([u8::try_from(x).unwrap_or(u8::MAX)])
        })
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        let binary = binary_threshold(&ramp(), 150, false);
        assert_eq!(binary.get_pixel(150, 0).0[0], 0);
        assert_eq!(binary.get_pixel(151, 0).0[0], FOREGROUND);
    }

    #[test]
    fn output_is_two_level() {
        let binary = binary_threshold(&ramp(), 99, false);
        assert!(binary.pixels().all(|p| p.0[0] == 0 || p.0[0] == FOREGROUND));
        let on: usize = binary.pixels().filter(|p| p.0[0] == FOREGROUND).count();
        assert_eq!(on, 156);
    }

    #[test]
    fn max_threshold_clears_everything() {
        let binary = binary_threshold(&ramp(), u8::MAX, false);
        assert!(binary.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn threshold_preserves_dimensions() {
        let img = GrayImage::new(13, 29);
        assert_eq!(binary_threshold(&img, 10, false).dimensions(), (13, 29));
    }

    #[test]
    fn inverted_threshold_swaps_levels() {
        let plain = binary_threshold(&ramp(), 150, false);
        let inverted = binary_threshold(&ramp(), 150, true);
        assert_eq!(inverted.get_pixel(150, 0).0[0], FOREGROUND);
        assert_eq!(inverted.get_pixel(151, 0).0[0], 0);
        for (a, b) in plain.pixels().zip(inverted.pixels()) {
            assert_eq!(a.0[0], !b.0[0]);
        }
    }
}
