//! contrim-pipeline: contour extraction and vertex reduction (sans-IO).
//!
//! The core is [`simplify()`]: a single-pass sliding-window reduction that
//! drops contour points lying within a tolerance of the line between an
//! anchor and a probe point. Around it sits a small image pipeline:
//! decode -> grayscale -> binary threshold -> contour tracing -> simplify.
//!
//! This crate has **no I/O dependencies**. It operates on in-memory byte
//! slices and returns structured data; file handling and drawing live in
//! the `contrim` binary.

pub mod contour;
pub mod distance;
pub mod grayscale;
mod maybe_rayon;
pub mod simplify;
pub mod threshold;
pub mod types;

pub use contour::{TracedContours, trace_contours};
pub use distance::distance_to_line;
pub use simplify::{
    SimplifyStats, Tolerance, simplify, simplify_contours, simplify_contours_par,
};
pub use types::{
    BorderKind, Contour, ContourNode, Dimensions, PipelineConfig, PipelineError, Point,
    ProcessResult,
};

/// Run the full contour pipeline on encoded image bytes.
///
/// # Pipeline steps
///
/// 1. Validate the configuration
/// 2. Decode image and convert to grayscale
/// 3. Binary threshold (optionally inverted)
/// 4. Contour tracing with hierarchy
/// 5. Contour simplification
///
/// # Errors
///
/// Returns [`PipelineError::InvalidTolerance`] if the configured tolerance
/// is negative or NaN.
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is unrecognized.
/// Returns [`PipelineError::NoContours`] if thresholding leaves nothing to trace.
pub fn process(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    config.validate()?;

    let gray = grayscale::decode_and_grayscale(image_bytes)?;
    let dimensions = Dimensions {
        width: gray.width(),
        height: gray.height(),
    };

    let binary = threshold::binary_threshold(&gray, config.threshold, config.invert);

    let TracedContours {
        contours,
        hierarchy,
    } = trace_contours(&binary);
    if contours.is_empty() {
        return Err(PipelineError::NoContours);
    }

    let simplified = simplify_contours_par(&contours, config.tolerance)?;
    let stats = SimplifyStats::collect(&contours, &simplified);
    tracing::debug!(
        tolerance = config.tolerance,
        contours = stats.contours,
        points_before = stats.points_before,
        points_after = stats.points_after,
        "simplified contours"
    );

    Ok(ProcessResult {
        contours,
        hierarchy,
        simplified,
        stats,
        dimensions,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::grayscale::encode_png;

    /// White disc of radius `r` centred in a black square image.
    fn disc_png(size: u32, r: f64) -> Vec<u8> {
        let c = f64::from(size) / 2.0;
        let img = image::RgbaImage::from_fn(size, size, |x, y| {
            let dx = f64::from(x) + 0.5 - c;
            let dy = f64::from(y) + 0.5 - c;
            if dx.hypot(dy) <= r {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        encode_png(&img)
    }

    #[test]
    fn process_empty_input() {
        let result = process(&[], &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn process_corrupt_input() {
        let result = process(&[0xFF, 0x00], &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn process_rejects_negative_tolerance_before_decoding() {
        let config = PipelineConfig {
            tolerance: -2.0,
            ..PipelineConfig::default()
        };
        // Empty input would otherwise be reported first.
        let result = process(&[], &config);
        assert!(matches!(result, Err(PipelineError::InvalidTolerance(_))));
    }

    #[test]
    fn process_dark_image_has_no_contours() {
        let img = image::RgbaImage::from_pixel(16, 16, image::Rgba([100, 100, 100, 255]));
        let result = process(&encode_png(&img), &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::NoContours)));
    }

    #[test]
    fn process_disc_reduces_points() {
        let result = process(&disc_png(64, 20.0), &PipelineConfig::default()).unwrap();
        assert_eq!(result.dimensions, Dimensions { width: 64, height: 64 });
        assert_eq!(result.contours.len(), 1);
        assert_eq!(result.simplified.len(), 1);
        assert_eq!(result.hierarchy.len(), 1);
        assert!(result.stats.points_after < result.stats.points_before);
        assert!(result.stats.reduction_ratio() > 0.0);
    }

    #[test]
    fn process_inverted_disc_traces_background_and_hole() {
        let config = PipelineConfig {
            invert: true,
            ..PipelineConfig::default()
        };
        let result = process(&disc_png(64, 20.0), &config).unwrap();
        assert_eq!(result.contours.len(), 2);
        assert_eq!(
            result.hierarchy,
            vec![
                ContourNode {
                    parent: None,
                    border: BorderKind::Outer,
                },
                ContourNode {
                    parent: Some(0),
                    border: BorderKind::Hole,
                },
            ]
        );
        // The background's outer border runs along the image edge.
        assert!(result.contours[0].points().contains(&Point::new(0.0, 0.0)));
        assert!(result.contours[0].points().contains(&Point::new(63.0, 63.0)));
    }
}
