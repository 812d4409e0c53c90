use crate::foundation::core::{Point, Vec2};

/// Rotate `v` by `radians` (positive is clockwise in y-down image space).
pub fn rotate_vec(v: Vec2, radians: f64) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// The two barb end points of an arrowhead sitting on `tip`.
///
/// The barbs start from the reversed line direction (`tail - tip`), scaled to `length`, and
/// are rotated by `+angle` and `-angle` respectively. A zero-length line has no direction,
/// so both barbs collapse onto the tip.
pub fn arrow_barbs(tail: Point, tip: Point, length: f64, angle: f64) -> (Point, Point) {
    let back = tail - tip;
    let d = back.hypot();
    if d <= f64::EPSILON {
        return (tip, tip);
    }
    let v = back * (length / d);
    (tip + rotate_vec(v, angle), tip + rotate_vec(v, -angle))
}

/// Uniform scale that fits a `w x h` box inside a `box_w x box_h` box.
///
/// Ties go to the horizontal factor. No upscale cap is applied.
pub fn fit_scale(w: f64, h: f64, box_w: f64, box_h: f64) -> f64 {
    let sx = box_w / w;
    let sy = box_h / h;
    if sx <= sy { sx } else { sy }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/vector.rs"]
mod tests;
