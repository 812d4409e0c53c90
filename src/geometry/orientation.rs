//! EXIF orientation codes and user rotation folded into one effective angle.

use crate::foundation::error::{WallprintError, WallprintResult};

/// Clockwise rotation in quarter turns, as applied to the raw pixel buffer for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RotationAngle {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl RotationAngle {
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    pub fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    pub fn radians(self) -> f64 {
        f64::from(self.degrees()) / 180.0 * std::f64::consts::PI
    }

    /// Whether displayed width/height are the raw buffer's height/width.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// `(self + other) mod 360`.
    pub fn compose(self, other: Self) -> Self {
        Self::from_degrees((self.degrees() + other.degrees()) % 360)
            .unwrap_or(Self::Deg0)
    }

    pub fn from_degrees(deg: u32) -> Option<Self> {
        match deg {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }
}

impl TryFrom<i64> for RotationAngle {
    type Error = WallprintError;

    fn try_from(deg: i64) -> Result<Self, Self::Error> {
        u32::try_from(deg)
            .ok()
            .and_then(Self::from_degrees)
            .ok_or_else(|| {
                WallprintError::validation(format!("rotation must be 0, 90, 180 or 270, got {deg}"))
            })
    }
}

impl From<RotationAngle> for i64 {
    fn from(a: RotationAngle) -> Self {
        i64::from(a.degrees())
    }
}

/// Strict mapping of an EXIF orientation code to a rotation.
///
/// Only the pure rotations are supported: 3 -> 180, 6 -> 90, 8 -> 270. Code 1 (and a missing
/// tag) is the identity. Mirrored codes and anything else are reported as unsupported.
pub fn exif_angle(code: Option<u16>) -> WallprintResult<RotationAngle> {
    match code {
        Some(3) => Ok(RotationAngle::Deg180),
        Some(6) => Ok(RotationAngle::Deg90),
        Some(8) => Ok(RotationAngle::Deg270),
        Some(1) => Ok(RotationAngle::Deg0),
        other => Err(WallprintError::OrientationUnsupported(other)),
    }
}

/// Effective angle = EXIF angle + user rotation (mod 360).
///
/// Unsupported EXIF codes are not fatal: they are logged and contribute 0°.
pub fn resolve_angle(exif: Option<u16>, user: RotationAngle) -> RotationAngle {
    let base = match exif_angle(exif) {
        Ok(a) => a,
        Err(e) => {
            if exif.is_some() {
                tracing::warn!(error = %e, "ignoring exif orientation");
            } else {
                tracing::debug!("no exif orientation; assuming upright");
            }
            RotationAngle::Deg0
        }
    };
    let effective = base.compose(user);
    tracing::debug!(
        exif = ?exif,
        user = user.degrees(),
        effective = effective.degrees(),
        "resolved rotation"
    );
    effective
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/orientation.rs"]
mod tests;
