//! Image decoding and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces a
//! single-channel grayscale image ready for thresholding.

use image::GrayImage;

use crate::types::PipelineError;

/// Decode raw image bytes and convert to 8-bit grayscale.
///
/// Uses the `image` crate's luminance conversion
/// (`0.299*R + 0.587*G + 0.114*B`), matching what contour tools expect
/// from a BGR-to-gray step.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_and_grayscale(bytes: &[u8]) -> Result<GrayImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );
    Ok(img.to_luma8())
}

/// Encode an RGBA image as PNG bytes. Shared by tests across the crate.
#[cfg(test)]
pub(crate) fn encode_png(img: &image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgba8,
    )
    .ok();
    buf
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            decode_and_grayscale(&[]),
            Err(PipelineError::EmptyInput)
        ));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            decode_and_grayscale(b"not an image"),
            Err(PipelineError::ImageDecode(_))
        ));
    }

    #[test]
    fn dimensions_survive_decoding() {
        let img = image::RgbaImage::from_pixel(23, 9, image::Rgba([10, 200, 30, 255]));
        let gray = decode_and_grayscale(&encode_png(&img)).unwrap();
        assert_eq!(gray.dimensions(), (23, 9));
    }

    #[test]
    fn black_and_white_stay_extreme() {
        let img = image::RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgba([0, 0, 0, 255])
            } else {
                image::Rgba([255, 255, 255, 255])
            }
        });
        let gray = decode_and_grayscale(&encode_png(&img)).unwrap();
        assert_eq!(gray.get_pixel(0, 0).0[0], 0);
        assert_eq!(gray.get_pixel(1, 0).0[0], 255);
    }

    #[test]
    fn luminance_weights_green_highest() {
        let img = image::RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => image::Rgba([255, 0, 0, 255]),
            1 => image::Rgba([0, 255, 0, 255]),
            _ => image::Rgba([0, 0, 255, 255]),
        });
        let gray = decode_and_grayscale(&encode_png(&img)).unwrap();
        let (r, g, b) = (
            gray.get_pixel(0, 0).0[0],
            gray.get_pixel(1, 0).0[0],
            gray.get_pixel(2, 0).0[0],
        );
        assert!(g > r && r > b, "expected G > R > B, got R={r} G={g} B={b}");
    }
}
