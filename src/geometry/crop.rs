//! Source crop rectangle, destination canvas and draw transform for the trimmed base image.
//!
//! There are four fixed recipes, one per effective angle. Each maps the raw pixel buffer
//! into a destination canvas so that the rotated, cropped content covers the canvas
//! exactly. The transform is composed in canvas order:
//!
//! `T(anchor) * R(angle) * T(origin) * S(k) * T(-sx, -sy)`
//!
//! where `(sx, sy)` is the crop origin in raw pixels, `k` the uniform scale, `origin` where
//! the scaled crop starts inside the rotated frame and `anchor` the canvas point the
//! rotated frame hangs from.

use crate::{
    foundation::core::{Affine, Canvas, Point, Rect, Vec2},
    foundation::error::{WallprintError, WallprintResult},
    geometry::orientation::RotationAngle,
    geometry::trim::{TrimSpec, trim_pixels},
};

/// Which displayed edge is normalized to the configured trimmed height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimScale {
    /// The longer displayed edge becomes `trimmed_height`.
    #[default]
    LongEdge,
    /// The displayed height becomes `trimmed_height`, whatever the aspect.
    Height,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropPlan {
    pub angle: RotationAngle,
    /// Crop rectangle in raw buffer pixels.
    pub source: Rect,
    /// Exact (unrounded) destination size.
    pub dest_w: f64,
    pub dest_h: f64,
    /// Destination size rounded to whole pixels.
    pub canvas: Canvas,
    /// Uniform raw-pixel -> canvas-pixel scale.
    pub scale: f64,
    /// Maps raw buffer coordinates onto the destination canvas.
    pub transform: Affine,
}

impl CropPlan {
    /// Map a raw buffer point to canvas coordinates.
    pub fn map(&self, p: Point) -> Point {
        self.transform * p
    }
}

/// Plan the trimmed/rotated base image.
///
/// Fails with [`WallprintError::InvalidTrimGeometry`] when the trim leaves no pixels and
/// with [`WallprintError::InvalidImageDimensions`] for an empty source.
pub fn plan_crop(
    angle: RotationAngle,
    trim: &TrimSpec,
    raw_w: u32,
    raw_h: u32,
    trimmed_height: u32,
    mode: TrimScale,
) -> WallprintResult<CropPlan> {
    if raw_w == 0 || raw_h == 0 {
        return Err(WallprintError::InvalidImageDimensions {
            width: raw_w,
            height: raw_h,
        });
    }
    if trimmed_height == 0 {
        return Err(WallprintError::validation("trimmed_height must be > 0"));
    }
    trim.validate()?;

    let px = trim_pixels(angle, trim, raw_w, raw_h);
    let (w, h) = (f64::from(raw_w), f64::from(raw_h));

    let (sx, sy, sw, sh) = match angle {
        RotationAngle::Deg0 => (px.left, px.top, w - px.left - px.right, h - px.top - px.bottom),
        RotationAngle::Deg90 => (px.top, px.right, w - px.top - px.bottom, h - px.left - px.right),
        RotationAngle::Deg180 => (
            px.right,
            px.bottom,
            w - px.left - px.right,
            h - px.top - px.bottom,
        ),
        RotationAngle::Deg270 => (
            px.bottom,
            px.left,
            w - px.top - px.bottom,
            h - px.left - px.right,
        ),
    };
    if !(sw > 0.0 && sh > 0.0) {
        return Err(WallprintError::trim(format!(
            "crop {sw}x{sh} at ({sx}, {sy}) is empty"
        )));
    }

    let (disp_w, disp_h) = if angle.swaps_axes() {
        (sh, sw)
    } else {
        (sw, sh)
    };
    let target = f64::from(trimmed_height);
    let k = match mode {
        TrimScale::LongEdge => target / disp_w.max(disp_h),
        TrimScale::Height => target / disp_h,
    };
    let (dest_w, dest_h) = (disp_w * k, disp_h * k);
    let canvas = Canvas::from_f64(dest_w, dest_h)?;

    // Scaled crop extent inside the rotated frame.
    let (ew, eh) = (sw * k, sh * k);
    let (anchor, origin) = match angle {
        RotationAngle::Deg0 => (Vec2::ZERO, Vec2::ZERO),
        RotationAngle::Deg90 => (Vec2::new(0.0, dest_h), Vec2::new(-ew, -eh)),
        RotationAngle::Deg180 => (Vec2::ZERO, Vec2::new(-ew, -eh)),
        RotationAngle::Deg270 => (Vec2::new(0.0, dest_h), Vec2::ZERO),
    };
    let transform = Affine::translate(anchor)
        * Affine::rotate(angle.radians())
        * Affine::translate(origin)
        * Affine::scale(k)
        * Affine::translate(Vec2::new(-sx, -sy));

    tracing::debug!(
        angle = angle.degrees(),
        sx,
        sy,
        sw,
        sh,
        dest_w,
        dest_h,
        "planned crop"
    );

    Ok(CropPlan {
        angle,
        source: Rect::new(sx, sy, sx + sw, sy + sh),
        dest_w,
        dest_h,
        canvas,
        scale: k,
        transform,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/crop.rs"]
mod tests;
