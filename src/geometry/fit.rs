use crate::{
    foundation::core::{Affine, Vec2},
    foundation::error::{WallprintError, WallprintResult},
    geometry::vector::fit_scale,
};

/// Placement of a `w x h` image centered inside a `size x size` square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquareFit {
    pub size: u32,
    pub scale: f64,
    pub dw: f64,
    pub dh: f64,
    pub dx: f64,
    pub dy: f64,
}

impl SquareFit {
    /// Maps source pixels onto the square canvas.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.dx, self.dy)) * Affine::scale(self.scale)
    }
}

/// `scale = min(size/w, size/h)`, centered at `((size - dw)/2, (size - dh)/2)`.
pub fn fit_square(w: u32, h: u32, size: u32) -> WallprintResult<SquareFit> {
    if w == 0 || h == 0 {
        return Err(WallprintError::InvalidImageDimensions {
            width: w,
            height: h,
        });
    }
    if size == 0 {
        return Err(WallprintError::validation("thumbnail size must be > 0"));
    }
    let s = f64::from(size);
    let scale = fit_scale(f64::from(w), f64::from(h), s, s);
    let dw = f64::from(w) * scale;
    let dh = f64::from(h) * scale;
    Ok(SquareFit {
        size,
        scale,
        dw,
        dh,
        dx: (s - dw) / 2.0,
        dy: (s - dh) / 2.0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
