//! Annotation primitives: hold markers and directional line annotations.
//!
//! Records arrive in the client's wire format (`PrimitiveRecord`) and are resolved into a
//! closed [`Primitive`] once, at the boundary. Size classes and (for labelled kinds)
//! placements are strict; unknown kinds degrade to [`PrimitiveKind::PlainHold`].

use std::f64::consts::FRAC_PI_2;

use crate::{
    foundation::core::{Point, Rgb8},
    foundation::error::{WallprintError, WallprintResult},
};

/// Font size shared by every label.
pub const LABEL_FONT_SIZE: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    StartHold,
    StartHoldHand,
    StartHoldFoot,
    StartHoldRightHand,
    StartHoldLeftHand,
    GoalHold,
    Bote,
    Kante,
    /// Circle only, no label.
    PlainHold,
}

/// Text drawn next to (or instead of) a primitive's shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelSpec {
    pub text: &'static str,
    pub font_size: f32,
}

/// Arrowhead geometry for the line-annotation kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineTip {
    pub length: f64,
    /// Barb angle from the reversed line direction, radians.
    pub angle: f64,
}

impl PrimitiveKind {
    const WIRE_PREFIX: &'static str = "PrimitiveType.";

    /// Resolve a wire name (`"PrimitiveType.Bote"` or `"Bote"`).
    pub fn parse(raw: &str) -> Self {
        let name = raw.strip_prefix(Self::WIRE_PREFIX).unwrap_or(raw);
        match name {
            "StartHold" => Self::StartHold,
            "StartHold_Hand" => Self::StartHoldHand,
            "StartHold_Foot" => Self::StartHoldFoot,
            "StartHold_RightHand" => Self::StartHoldRightHand,
            "StartHold_LeftHand" => Self::StartHoldLeftHand,
            "GoalHold" => Self::GoalHold,
            "Bote" => Self::Bote,
            "Kante" => Self::Kante,
            "PlainHold" => Self::PlainHold,
            other => {
                tracing::warn!(kind = other, "unrecognized primitive kind; drawing without label");
                Self::PlainHold
            }
        }
    }

    pub fn label(self) -> Option<LabelSpec> {
        let text = match self {
            Self::StartHold => "S",
            Self::StartHoldHand => "手",
            Self::StartHoldFoot => "足",
            Self::StartHoldRightHand => "右",
            Self::StartHoldLeftHand => "左",
            Self::GoalHold => "G",
            Self::Bote => "ボテ",
            Self::Kante => "カンテ",
            Self::PlainHold => return None,
        };
        Some(LabelSpec {
            text,
            font_size: LABEL_FONT_SIZE,
        })
    }

    /// `Some` for kinds drawn as a label plus a pointing line instead of a circle.
    pub fn line_tip(self) -> Option<LineTip> {
        match self {
            Self::Bote => Some(LineTip {
                length: 10.0,
                angle: 0.55,
            }),
            Self::Kante => Some(LineTip {
                length: 20.0,
                angle: FRAC_PI_2,
            }),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeClass {
    XS,
    S,
    M,
    L,
    XL,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeDims {
    pub radius: f64,
    pub stroke_width: f64,
}

impl SizeClass {
    const WIRE_PREFIX: &'static str = "PrimitiveSizeType.";

    pub fn parse(raw: &str) -> WallprintResult<Self> {
        match raw.strip_prefix(Self::WIRE_PREFIX).unwrap_or(raw) {
            "XS" => Ok(Self::XS),
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::XL),
            _ => Err(WallprintError::UnknownPrimitiveSizeType(raw.to_string())),
        }
    }

    pub fn dims(self) -> ShapeDims {
        let radius = match self {
            Self::XS => 20.0,
            Self::S => 30.0,
            Self::M => 40.0,
            Self::L => 50.0,
            Self::XL => 60.0,
        };
        ShapeDims {
            radius,
            stroke_width: 4.0,
        }
    }
}

/// Where a label sits relative to its shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    Center,
    Right,
    Bottom,
    Left,
    Top,
}

impl Placement {
    const WIRE_PREFIX: &'static str = "PrimitiveSubItemPosition.";

    pub fn parse(raw: &str) -> WallprintResult<Self> {
        match raw.strip_prefix(Self::WIRE_PREFIX).unwrap_or(raw) {
            "Center" => Ok(Self::Center),
            "Right" => Ok(Self::Right),
            "Bottom" => Ok(Self::Bottom),
            "Left" => Ok(Self::Left),
            "Top" => Ok(Self::Top),
            _ => Err(WallprintError::InvalidPlacement(raw.to_string())),
        }
    }
}

/// A primitive document as stored under `problems/{id}/primitives`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveRecord {
    pub position_x: f64,
    pub position_y: f64,
    pub size_type: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub color: Rgb8,
    #[serde(default)]
    pub sub_item_position: Option<String>,
}

/// A resolved primitive, in canvas-local (pre-offset) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub position: Point,
    pub kind: PrimitiveKind,
    pub size: SizeClass,
    pub color: Rgb8,
    /// Present whenever `kind` carries a label.
    pub placement: Option<Placement>,
}

impl Primitive {
    pub fn from_record(rec: &PrimitiveRecord) -> WallprintResult<Self> {
        let size = SizeClass::parse(&rec.size_type)?;
        let kind = PrimitiveKind::parse(&rec.kind);
        let placement = if kind.label().is_some() {
            let raw = rec.sub_item_position.as_deref().ok_or_else(|| {
                WallprintError::InvalidPlacement("<missing subItemPosition>".to_string())
            })?;
            Some(Placement::parse(raw)?)
        } else {
            // Unlabelled kinds never consult the placement, so a bad value is harmless.
            rec.sub_item_position
                .as_deref()
                .and_then(|raw| Placement::parse(raw).ok())
        };
        Ok(Self {
            position: Point::new(rec.position_x, rec.position_y),
            kind,
            size,
            color: rec.color,
            placement,
        })
    }

    /// Resolve a JSON document fetched from the record store.
    pub fn from_json(value: &serde_json::Value) -> WallprintResult<Self> {
        let rec: PrimitiveRecord = serde_json::from_value(value.clone())
            .map_err(|e| WallprintError::validation(format!("primitive record: {e}")))?;
        Self::from_record(&rec)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/primitive.rs"]
mod tests;
