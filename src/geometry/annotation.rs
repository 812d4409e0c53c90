//! Pure layout of annotation primitives.
//!
//! Everything the primitive renderer draws is decided here, without a drawing backend:
//! circle geometry, label origin and the arrow/kante line path. Labels are positioned with a
//! "middle" baseline, i.e. `origin.y` is the vertical center of the text's em box.

use crate::{
    foundation::core::{BezPath, Point, Rgb8, Vec2},
    foundation::error::{WallprintError, WallprintResult},
    geometry::vector::arrow_barbs,
    model::primitive::{Placement, Primitive},
};

/// Horizontal metrics of a shaped label.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

/// Measures label text. Implemented by the text shaper; faked in tests.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, font_size: f32) -> WallprintResult<TextMetrics>;
}

/// How a label's height is derived from its metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextHeight {
    /// `width / char_count`. Matches previously rendered problem images; unsound for mixed
    /// CJK/Latin strings.
    #[default]
    Approximate,
    /// `ascent + descent` from the font.
    Metrics,
}

impl TextHeight {
    pub fn resolve(self, text: &str, metrics: &TextMetrics) -> f64 {
        match self {
            Self::Approximate => {
                let chars = text.chars().count().max(1);
                metrics.width / chars as f64
            }
            Self::Metrics => metrics.ascent + metrics.descent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CirclePlan {
    pub center: Point,
    pub radius: f64,
}

/// Where and what to draw for a label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlan {
    pub text: &'static str,
    pub font_size: f32,
    /// Left edge of the text, vertical middle of the em box.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

/// The straight annotation line plus its two barbs, all stroked in one path.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePlan {
    pub start: Point,
    pub tip: Point,
    pub barbs: (Point, Point),
}

impl LinePlan {
    /// `start -> tip`, then `barb_a -> tip -> barb_b`.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.tip);
        path.move_to(self.barbs.0);
        path.line_to(self.tip);
        path.line_to(self.barbs.1);
        path
    }
}

/// Fully resolved drawing instructions for one primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitivePlan {
    pub color: Rgb8,
    pub stroke_width: f64,
    pub circle: Option<CirclePlan>,
    pub label: Option<LabelPlan>,
    pub line: Option<LinePlan>,
}

/// Lay out `primitive` with its position shifted by `offset`.
pub fn plan_primitive(
    primitive: &Primitive,
    offset: Vec2,
    measure: &mut dyn TextMeasure,
    text_height: TextHeight,
) -> WallprintResult<PrimitivePlan> {
    let dims = primitive.size.dims();
    let radius = dims.radius;
    let at = primitive.position + offset;

    let label = match primitive.kind.label() {
        Some(spec) => {
            let metrics = measure.measure(spec.text, spec.font_size)?;
            let placement = primitive.placement.ok_or_else(|| {
                WallprintError::InvalidPlacement("<missing subItemPosition>".to_string())
            })?;
            Some((spec, metrics, placement))
        }
        None => None,
    };

    let mut plan = PrimitivePlan {
        color: primitive.color,
        stroke_width: dims.stroke_width,
        circle: None,
        label: None,
        line: None,
    };

    match (primitive.kind.line_tip(), label) {
        (Some(tip), Some((spec, metrics, placement))) => {
            let w = metrics.width;
            let h = text_height.resolve(spec.text, &metrics);
            let left = at.x - w / 2.0;
            let top = at.y - h / 2.0;
            plan.label = Some(LabelPlan {
                text: spec.text,
                font_size: spec.font_size,
                origin: Point::new(left, at.y),
                width: w,
                height: h,
            });

            let reach = radius * 2.0;
            let ends = match placement {
                Placement::Center => None,
                Placement::Right => {
                    let p1 = Point::new(left + w, top + h / 2.0);
                    Some((p1, p1 + Vec2::new(reach, 0.0)))
                }
                Placement::Bottom => {
                    let p1 = Point::new(left + w / 2.0, top + h);
                    Some((p1, p1 + Vec2::new(0.0, reach)))
                }
                Placement::Left => {
                    let p1 = Point::new(left, top + h / 2.0);
                    Some((p1, p1 - Vec2::new(reach, 0.0)))
                }
                Placement::Top => {
                    let p1 = Point::new(left + w / 2.0, top);
                    Some((p1, p1 - Vec2::new(0.0, reach)))
                }
            };
            plan.line = ends.map(|(start, end)| LinePlan {
                start,
                tip: end,
                barbs: arrow_barbs(start, end, tip.length, tip.angle),
            });
        }
        (_, label) => {
            plan.circle = Some(CirclePlan { center: at, radius });
            if let Some((spec, metrics, placement)) = label {
                let w = metrics.width;
                let h = text_height.resolve(spec.text, &metrics);
                let origin = match placement {
                    Placement::Center => Point::new(at.x - w / 2.0, at.y),
                    Placement::Right => Point::new(at.x + radius, at.y),
                    Placement::Bottom => Point::new(at.x - w / 2.0, at.y + radius),
                    Placement::Left => Point::new(at.x - radius - w, at.y),
                    Placement::Top => Point::new(at.x - w / 2.0, at.y - radius - h),
                };
                plan.label = Some(LabelPlan {
                    text: spec.text,
                    font_size: spec.font_size,
                    origin,
                    width: w,
                    height: h,
                });
            }
        }
    }

    Ok(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/annotation.rs"]
mod tests;
