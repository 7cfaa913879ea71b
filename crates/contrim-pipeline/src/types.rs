//! Shared types for the contrim contour pipeline.

use serde::{Deserialize, Serialize};

use crate::simplify::SimplifyStats;

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// A 2D point in image coordinates.
///
/// Contour extractors produce integer pixel positions; those convert
/// losslessly into `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

/// An ordered sequence of points tracing the boundary of one shape.
///
/// Contours are closed: the last point conceptually connects back to the
/// first. The point order defines the walk direction around the shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contour(Vec<Point>);

impl Contour {
    /// Create a new contour from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the contour has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the contour.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }
}

impl FromIterator<Point> for Contour {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Whether a traced border surrounds a shape or a hole inside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderKind {
    /// Outer border of a foreground component.
    Outer,
    /// Border of a background hole inside a foreground component.
    Hole,
}

/// Hierarchy entry for the contour at the same index.
///
/// The simplifier ignores hierarchy; it is carried through so callers can
/// tell shapes from holes when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourNode {
    /// Index of the enclosing contour, if any.
    pub parent: Option<usize>,
    /// Outer border or hole border.
    pub border: BorderKind,
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for the contour pipeline.
///
/// Call [`validate`](Self::validate) before use; [`process`](crate::process)
/// does this itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Binary threshold. Gray values strictly above this become
    /// foreground (255), everything else background (0).
    pub threshold: u8,

    /// Whether to invert the binary image before contour tracing, so dark
    /// shapes on a light background are traced as foreground.
    pub invert: bool,

    /// Simplification tolerance `d` in pixels. Higher values drop more
    /// points. Must be non-negative and not NaN.
    pub tolerance: f64,
}

impl PipelineConfig {
    /// Default binary threshold.
    pub const DEFAULT_THRESHOLD: u8 = 150;

    /// Default simplification tolerance in pixels.
    pub const DEFAULT_TOLERANCE: f64 = 0.6;

    /// Check the configuration for values with no geometric meaning.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidTolerance`] if `tolerance` is
    /// negative or NaN.
    pub fn validate(&self) -> Result<(), PipelineError> {
        crate::simplify::Tolerance::new(self.tolerance).map(|_| ())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            invert: false,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

/// Result of running the full contour pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Contours as traced, before simplification.
    pub contours: Vec<Contour>,

    /// Hierarchy entries, one per contour, in the same order.
    pub hierarchy: Vec<ContourNode>,

    /// Simplified contours, one per traced contour, in the same order.
    pub simplified: Vec<Contour>,

    /// Point counts before and after simplification.
    pub stats: SimplifyStats,

    /// Dimensions of the source image in pixels.
    pub dimensions: Dimensions,
}

/// Errors that can occur during simplification or pipeline processing.
///
/// Uses custom `Serialize`/`Deserialize` because `image::ImageError`
/// does not implement serde traits. The `ImageDecode` variant is
/// serialized as its `Display` string and reads back as
/// `ImageDecodeMessage`.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Simplification tolerance is negative or NaN.
    #[error("tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Image decoding failed in another process; only the message survived
    /// serialization.
    #[error("failed to decode image: {0}")]
    ImageDecodeMessage(String),

    /// Contour tracing found nothing in the thresholded image.
    #[error("no contours found in the image")]
    NoContours,
}

/// Serde-compatible proxy for `PipelineError`.
#[derive(Serialize, Deserialize)]
enum PipelineErrorProxy {
    InvalidTolerance(f64),
    ImageDecode(String),
    EmptyInput,
    NoContours,
}

impl Serialize for PipelineError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let proxy = match self {
            Self::InvalidTolerance(d) => PipelineErrorProxy::InvalidTolerance(*d),
            Self::ImageDecode(e) => PipelineErrorProxy::ImageDecode(e.to_string()),
            Self::ImageDecodeMessage(msg) => PipelineErrorProxy::ImageDecode(msg.clone()),
            Self::EmptyInput => PipelineErrorProxy::EmptyInput,
            Self::NoContours => PipelineErrorProxy::NoContours,
        };
        proxy.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PipelineError {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let proxy = PipelineErrorProxy::deserialize(deserializer)?;
        Ok(match proxy {
            PipelineErrorProxy::InvalidTolerance(d) => Self::InvalidTolerance(d),
            // The typed image::ImageError cannot be rebuilt; keep the message.
            PipelineErrorProxy::ImageDecode(msg) => Self::ImageDecodeMessage(msg),
            PipelineErrorProxy::EmptyInput => Self::EmptyInput,
            PipelineErrorProxy::NoContours => Self::NoContours,
        })
    }
}
