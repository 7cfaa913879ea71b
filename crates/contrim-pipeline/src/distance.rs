//! Point-to-line distance.

use crate::types::Point;

/// Perpendicular distance from `p3` to the infinite line through `p1` and `p2`.
///
/// Computed as the magnitude of the cross product of `p2 - p1` and
/// `p3 - p1` divided by the length of the base `p2 - p1`, i.e. the area
/// of the parallelogram spanned by the three points over its base.
///
/// When `p1` and `p2` coincide there is no line. The result is then
/// [`f64::INFINITY`], so a simplifier comparing against any finite
/// tolerance always keeps the point under test.
///
/// Coordinates large enough to overflow the intermediate products can
/// make the quotient undefined (`inf / inf`). That case also reports
/// [`f64::INFINITY`], so the result is never NaN for non-NaN inputs.
#[must_use]
pub fn distance_to_line(p1: Point, p2: Point, p3: Point) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let base = dx.hypot(dy);

    if base == 0.0 {
        return f64::INFINITY;
    }

    let cross = dx.mul_add(p1.y - p3.y, -((p1.x - p3.x) * dy));
    let dist = cross.abs() / base;
    if dist.is_nan() { f64::INFINITY } else { dist }
}
