use crate::foundation::error::{WallprintError, WallprintResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Pixel size of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> WallprintResult<Self> {
        if width == 0 || height == 0 {
            return Err(WallprintError::InvalidImageDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Canvas from fractional sizes, rounding to the nearest pixel (at least 1).
    pub fn from_f64(width: f64, height: f64) -> WallprintResult<Self> {
        fn px(v: f64) -> Option<u32> {
            if !v.is_finite() || v <= 0.0 || v > f64::from(u32::MAX) {
                return None;
            }
            Some((v.round() as u32).max(1))
        }
        match (px(width), px(height)) {
            (Some(w), Some(h)) => Ok(Self {
                width: w,
                height: h,
            }),
            _ => Err(WallprintError::InvalidImageDimensions {
                width: width.max(0.0) as u32,
                height: height.max(0.0) as u32,
            }),
        }
    }

    pub fn long_edge(self) -> u32 {
        self.width.max(self.height)
    }
}

/// Straight (non-premultiplied) RGB color used for primitive strokes and labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse the client's `"r,g,b"` notation (whitespace tolerant).
    pub fn parse_triple(s: &str) -> WallprintResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [r, g, b] = parts.as_slice() else {
            return Err(WallprintError::validation(format!(
                "color '{s}' must have three components"
            )));
        };
        let channel = |c: &str| {
            c.parse::<u8>().map_err(|_| {
                WallprintError::validation(format!("color component '{c}' is not in 0..=255"))
            })
        };
        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Triple(String),
            Array([u8; 3]),
            Object { r: u8, g: u8, b: u8 },
        }

        match Wire::deserialize(deserializer)? {
            Wire::Triple(s) => Self::parse_triple(&s).map_err(serde::de::Error::custom),
            Wire::Array([r, g, b]) | Wire::Object { r, g, b } => Ok(Self::new(r, g, b)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
