use crate::{
    foundation::core::{Canvas, Vec2},
    foundation::error::{WallprintError, WallprintResult},
    geometry::orientation::RotationAngle,
};

/// Fractions of each displayed edge to discard, each in `[0, 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrimSpec {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
}

impl TrimSpec {
    pub const NONE: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Every fraction finite and in `[0, 1)`, and each opposing pair sums below 1.
    pub fn validate(&self) -> WallprintResult<()> {
        for (name, v) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if !v.is_finite() || !(0.0..1.0).contains(&v) {
                return Err(WallprintError::trim(format!(
                    "trim {name} must be in [0, 1), got {v}"
                )));
            }
        }
        if self.left + self.right >= 1.0 {
            return Err(WallprintError::trim(format!(
                "trim left + right must be < 1, got {}",
                self.left + self.right
            )));
        }
        if self.top + self.bottom >= 1.0 {
            return Err(WallprintError::trim(format!(
                "trim top + bottom must be < 1, got {}",
                self.top + self.bottom
            )));
        }
        Ok(())
    }
}

/// Absolute trim amounts in pixels, still named after the displayed edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrimPixels {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Scale displayed-orientation trim fractions by the raw buffer edge they run along.
///
/// For 90°/270° the displayed width is the raw height, so left/right scale by `raw_h` and
/// top/bottom by `raw_w`.
pub fn trim_pixels(angle: RotationAngle, trim: &TrimSpec, raw_w: u32, raw_h: u32) -> TrimPixels {
    let (w, h) = (f64::from(raw_w), f64::from(raw_h));
    let (horizontal, vertical) = if angle.swaps_axes() { (h, w) } else { (w, h) };
    TrimPixels {
        left: trim.left * horizontal,
        right: trim.right * horizontal,
        top: trim.top * vertical,
        bottom: trim.bottom * vertical,
    }
}

/// Canvas and draw offset for cropping an already-upright picture by trim fractions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetCrop {
    pub canvas: Canvas,
    /// Where the source's origin lands on the canvas (non-positive components).
    pub offset: Vec2,
}

/// Crop an upright `w x h` picture: canvas `(w(1-l-r), h(1-t-b))`, source drawn at
/// `(-w*l, -h*t)`.
pub fn offset_crop(w: u32, h: u32, trim: &TrimSpec) -> WallprintResult<OffsetCrop> {
    if w == 0 || h == 0 {
        return Err(WallprintError::InvalidImageDimensions {
            width: w,
            height: h,
        });
    }
    trim.validate()?;
    let (wf, hf) = (f64::from(w), f64::from(h));
    let cw = wf * (1.0 - trim.left - trim.right);
    let ch = hf * (1.0 - trim.top - trim.bottom);
    let canvas = Canvas::from_f64(cw, ch)
        .map_err(|_| WallprintError::trim(format!("trimmed area {cw}x{ch} is empty")))?;
    Ok(OffsetCrop {
        canvas,
        offset: Vec2::new(-wf * trim.left, -hf * trim.top),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/trim.rs"]
mod tests;
