//! Contour tracing: extract closed borders from a binary image.
//!
//! Uses Suzuki-Abe border following via
//! [`imageproc::contours::find_contours`]. Every border is kept, both
//! outer borders and hole borders, together with its parent link. No
//! chain approximation is applied: each border pixel becomes one point,
//! leaving all reduction to [`simplify`](crate::simplify).
//!
//! The image is traced inside a one-pixel background frame, so foreground
//! touching the image edge still gets an outer border and every hole has
//! an enclosing parent.

use image::GrayImage;
use imageproc::contours::BorderType;

use crate::types::{BorderKind, Contour, ContourNode, Point};

/// Contours traced from one image, with a parallel hierarchy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TracedContours {
    /// Border point sequences, in discovery (raster) order.
    pub contours: Vec<Contour>,
    /// One hierarchy entry per contour, same order.
    pub hierarchy: Vec<ContourNode>,
}

impl TracedContours {
    /// Number of traced contours.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.contours.len()
    }

    /// Returns `true` if nothing was traced.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// Trace every border in `binary`. Nonzero pixels are foreground.
///
/// Points are in `binary`'s own coordinates.
#[must_use = "returns the traced contours"]
pub fn trace_contours(binary: &GrayImage) -> TracedContours {
    let mut framed = GrayImage::new(binary.width() + 2, binary.height() + 2);
    image::imageops::replace(&mut framed, binary, 1, 1);

    let found: Vec<imageproc::contours::Contour<i32>> =
        imageproc::contours::find_contours(&framed);

    let mut traced = TracedContours {
        contours: Vec::with_capacity(found.len()),
        hierarchy: Vec::with_capacity(found.len()),
    };

    for c in found {
        let border = match c.border_type {
            BorderType::Outer => BorderKind::Outer,
            BorderType::Hole => BorderKind::Hole,
        };
        traced.hierarchy.push(ContourNode {
            parent: c.parent,
            border,
        });
        traced
            .contours
            .push(c.points.iter().map(|p| Point::from((p.x - 1, p.y - 1))).collect());
    }

    tracing::debug!(
        contours = traced.len(),
        points = traced.contours.iter().map(Contour::len).sum::<usize>(),
        "traced contours"
    );
    traced
}
