//! Contour overlay rendering via tiny-skia.

use contrim_pipeline::Contour;
use image::{Rgba, RgbaImage};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Original traced contours.
pub const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Simplified contours.
pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Stroke every contour as a closed anti-aliased polyline onto a
/// transparent `width` x `height` overlay.
///
/// Single-point contours draw as a filled dot. Returns `None`
/// only when the overlay cannot be allocated (zero-sized image).
#[allow(clippy::cast_possible_truncation)]
pub fn render_contours(
    contours: &[Contour],
    width: u32,
    height: u32,
    color: Rgba<u8>,
    line_width: f32,
) -> Option<RgbaImage> {
    let mut pixmap = Pixmap::new(width, height)?;

    let stroke = Stroke {
        width: line_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    let mut paint = Paint::default();
    let [r, g, b, a] = color.0;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    // Pixel centres sit at +0.5 in tiny-skia's coordinate space.
    let at = |v: f64| (v + 0.5) as f32;

    for contour in contours {
        let points = contour.points();
        let Some(first) = points.first() else {
            continue;
        };

        if points.len() == 1 {
            if let Some(dot) = PathBuilder::from_circle(at(first.x), at(first.y), line_width / 2.0) {
                pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
            }
            continue;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(at(first.x), at(first.y));
        for p in &points[1..] {
            pb.line_to(at(p.x), at(p.y));
        }
        pb.close();

        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    Some(unpremultiply(&pixmap))
}

/// Convert a premultiplied pixmap into a straight-alpha `RgbaImage`.
fn unpremultiply(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (pixel, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let a = src.alpha();
        if a == 0 {
            continue;
        }
        let c = src.demultiply();
        *pixel = Rgba([c.red(), c.green(), c.blue(), a]);
    }
    img
}

/// Draw `overlay` over `base` with alpha blending.
pub fn composite(base: &mut RgbaImage, overlay: &RgbaImage) {
    image::imageops::overlay(base, overlay, 0, 0);
}
