use super::*;
use crate::model::primitive::{PrimitiveKind, SizeClass};

/// Monospace stand-in: every char is `font_size` wide.
struct FixedAdvance {
    calls: usize,
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str, font_size: f32) -> WallprintResult<TextMetrics> {
        self.calls += 1;
        let em = f64::from(font_size);
        Ok(TextMetrics {
            width: em * text.chars().count() as f64,
            ascent: em * 0.8,
            descent: em * 0.2,
        })
    }
}

fn prim(kind: PrimitiveKind, placement: Option<Placement>) -> Primitive {
    Primitive {
        position: Point::new(500.0, 300.0),
        kind,
        size: SizeClass::M,
        color: Rgb8::new(10, 20, 30),
        placement,
    }
}

fn plan(p: &Primitive) -> PrimitivePlan {
    plan_primitive(p, Vec2::ZERO, &mut FixedAdvance { calls: 0 }, TextHeight::Approximate).unwrap()
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn bote_right_line_runs_from_text_edge_with_narrow_barbs() {
    let p = plan(&prim(PrimitiveKind::Bote, Some(Placement::Right)));
    assert!(p.circle.is_none());

    let label = p.label.unwrap();
    assert_eq!(label.text, "ボテ");
    assert_eq!(label.width, 120.0);
    assert_eq!(label.origin, Point::new(440.0, 300.0));

    let line = p.line.unwrap();
    let text_right = label.origin.x + label.width;
    assert_eq!(line.start, Point::new(text_right, 300.0));
    assert_eq!(line.tip, Point::new(text_right + 2.0 * 40.0, 300.0));

    let back = (line.start - line.tip).normalize();
    for barb in [line.barbs.0, line.barbs.1] {
        let v = barb - line.tip;
        assert!((v.hypot() - 10.0).abs() < 1e-9);
        let angle = (v.normalize().dot(back)).clamp(-1.0, 1.0).acos();
        assert!((angle - 0.55).abs() < 1e-9, "barb angle {angle}");
    }
    // One barb on each side of the line.
    assert!((line.barbs.0.y - 300.0) * (line.barbs.1.y - 300.0) < 0.0);
}

#[test]
fn kante_barbs_are_perpendicular() {
    let p = plan(&prim(PrimitiveKind::Kante, Some(Placement::Top)));
    let label = p.label.unwrap();
    // "カンテ": 180 wide, approximate height 60.
    assert_eq!(label.height, 60.0);
    let line = p.line.unwrap();
    assert_eq!(line.start, Point::new(500.0, 270.0));
    assert_eq!(line.tip, Point::new(500.0, 190.0));
    assert!(close(line.barbs.0, Point::new(480.0, 190.0)) || close(line.barbs.0, Point::new(520.0, 190.0)));
    assert!(close(
        line.barbs.0.midpoint(line.barbs.1),
        Point::new(500.0, 190.0)
    ));
}

#[test]
fn line_directions_follow_placement() {
    let cases = [
        (Placement::Bottom, Point::new(500.0, 330.0), Point::new(500.0, 410.0)),
        (Placement::Left, Point::new(440.0, 300.0), Point::new(360.0, 300.0)),
    ];
    for (placement, start, tip) in cases {
        let line = plan(&prim(PrimitiveKind::Bote, Some(placement))).line.unwrap();
        assert_eq!((line.start, line.tip), (start, tip), "{placement:?}");
    }
}

#[test]
fn centered_line_kind_draws_text_only() {
    let p = plan(&prim(PrimitiveKind::Bote, Some(Placement::Center)));
    assert!(p.line.is_none());
    assert!(p.circle.is_none());
    assert!(p.label.is_some());
}

#[test]
fn hold_labels_sit_outside_the_circle() {
    let origin = |placement| {
        plan(&prim(PrimitiveKind::GoalHold, Some(placement)))
            .label
            .unwrap()
            .origin
    };
    // "G": width 60, approximate height 60, radius 40.
    assert_eq!(origin(Placement::Center), Point::new(470.0, 300.0));
    assert_eq!(origin(Placement::Right), Point::new(540.0, 300.0));
    assert_eq!(origin(Placement::Bottom), Point::new(470.0, 340.0));
    assert_eq!(origin(Placement::Left), Point::new(400.0, 300.0));
    assert_eq!(origin(Placement::Top), Point::new(470.0, 200.0));

    let p = plan(&prim(PrimitiveKind::GoalHold, Some(Placement::Right)));
    assert_eq!(
        p.circle,
        Some(CirclePlan {
            center: Point::new(500.0, 300.0),
            radius: 40.0
        })
    );
    assert_eq!(p.stroke_width, 4.0);
    assert_eq!(p.color, Rgb8::new(10, 20, 30));
}

#[test]
fn plain_hold_skips_text_measurement() {
    let mut measure = FixedAdvance { calls: 0 };
    let p = plan_primitive(
        &prim(PrimitiveKind::PlainHold, None),
        Vec2::new(-100.0, -50.0),
        &mut measure,
        TextHeight::Approximate,
    )
    .unwrap();
    assert_eq!(measure.calls, 0);
    assert!(p.label.is_none() && p.line.is_none());
    assert_eq!(p.circle.unwrap().center, Point::new(400.0, 250.0));
}

#[test]
fn metrics_height_uses_ascent_and_descent() {
    let p = plan_primitive(
        &prim(PrimitiveKind::StartHoldHand, Some(Placement::Top)),
        Vec2::ZERO,
        &mut FixedAdvance { calls: 0 },
        TextHeight::Metrics,
    )
    .unwrap();
    assert_eq!(p.label.unwrap().height, 60.0);
    assert_eq!(TextHeight::Approximate.resolve("カンテ", &TextMetrics {
        width: 150.0,
        ascent: 0.0,
        descent: 0.0
    }), 50.0);
}

#[test]
fn labelled_kind_without_placement_fails() {
    let err = plan_primitive(
        &prim(PrimitiveKind::StartHold, None),
        Vec2::ZERO,
        &mut FixedAdvance { calls: 0 },
        TextHeight::Approximate,
    )
    .unwrap_err();
    assert!(matches!(err, WallprintError::InvalidPlacement(_)));
}

#[test]
fn line_path_has_two_subpaths() {
    let line = plan(&prim(PrimitiveKind::Bote, Some(Placement::Right))).line.unwrap();
    let path = line.to_path();
    let moves = path
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
    assert_eq!(path.elements().len(), 5);
}
