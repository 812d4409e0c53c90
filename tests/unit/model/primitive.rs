use serde_json::json;

use super::*;

#[test]
fn kinds_parse_with_or_without_wire_prefix() {
    assert_eq!(PrimitiveKind::parse("PrimitiveType.Bote"), PrimitiveKind::Bote);
    assert_eq!(PrimitiveKind::parse("Kante"), PrimitiveKind::Kante);
    assert_eq!(
        PrimitiveKind::parse("PrimitiveType.StartHold_RightHand"),
        PrimitiveKind::StartHoldRightHand
    );
    assert_eq!(PrimitiveKind::parse("PrimitiveType.Volume"), PrimitiveKind::PlainHold);
    assert_eq!(PrimitiveKind::parse(""), PrimitiveKind::PlainHold);
}

#[test]
fn label_table() {
    let text = |k: PrimitiveKind| k.label().map(|l| l.text);
    assert_eq!(text(PrimitiveKind::StartHold), Some("S"));
    assert_eq!(text(PrimitiveKind::StartHoldHand), Some("手"));
    assert_eq!(text(PrimitiveKind::StartHoldFoot), Some("足"));
    assert_eq!(text(PrimitiveKind::StartHoldRightHand), Some("右"));
    assert_eq!(text(PrimitiveKind::StartHoldLeftHand), Some("左"));
    assert_eq!(text(PrimitiveKind::GoalHold), Some("G"));
    assert_eq!(text(PrimitiveKind::Bote), Some("ボテ"));
    assert_eq!(text(PrimitiveKind::Kante), Some("カンテ"));
    assert_eq!(text(PrimitiveKind::PlainHold), None);
    assert_eq!(PrimitiveKind::GoalHold.label().unwrap().font_size, 60.0);
}

#[test]
fn size_table_and_strictness() {
    let radii: Vec<f64> = ["XS", "S", "M", "L", "XL"]
        .iter()
        .map(|s| SizeClass::parse(s).unwrap().dims().radius)
        .collect();
    assert_eq!(radii, vec![20.0, 30.0, 40.0, 50.0, 60.0]);
    assert_eq!(SizeClass::parse("PrimitiveSizeType.L").unwrap(), SizeClass::L);
    assert_eq!(SizeClass::XL.dims().stroke_width, 4.0);
    assert!(matches!(
        SizeClass::parse("PrimitiveSizeType.XXL"),
        Err(WallprintError::UnknownPrimitiveSizeType(_))
    ));
}

#[test]
fn record_resolves_from_client_json() {
    let p = Primitive::from_json(&json!({
        "positionX": 120.5,
        "positionY": 80.0,
        "sizeType": "PrimitiveSizeType.M",
        "type": "PrimitiveType.GoalHold",
        "color": "255,0,0",
        "subItemPosition": "PrimitiveSubItemPosition.Top",
    }))
    .unwrap();
    assert_eq!(p.position, Point::new(120.5, 80.0));
    assert_eq!(p.kind, PrimitiveKind::GoalHold);
    assert_eq!(p.size, SizeClass::M);
    assert_eq!(p.color, Rgb8::new(255, 0, 0));
    assert_eq!(p.placement, Some(Placement::Top));
}

#[test]
fn labelled_kinds_require_a_known_placement() {
    let base = json!({
        "positionX": 0.0,
        "positionY": 0.0,
        "sizeType": "S",
        "type": "Bote",
        "color": [0, 0, 0],
    });
    assert!(matches!(
        Primitive::from_json(&base),
        Err(WallprintError::InvalidPlacement(_))
    ));

    let mut bad = base.clone();
    bad["subItemPosition"] = json!("PrimitiveSubItemPosition.Diagonal");
    assert!(matches!(
        Primitive::from_json(&bad),
        Err(WallprintError::InvalidPlacement(_))
    ));
}

#[test]
fn unlabelled_kinds_ignore_placement() {
    let p = Primitive::from_json(&json!({
        "positionX": 1.0,
        "positionY": 2.0,
        "sizeType": "XS",
        "type": "PrimitiveType.Crimp",
        "subItemPosition": "nonsense",
    }))
    .unwrap();
    assert_eq!(p.kind, PrimitiveKind::PlainHold);
    assert_eq!(p.placement, None);
    assert_eq!(p.color, Rgb8::BLACK);
}

#[test]
fn line_tips() {
    let bote = PrimitiveKind::Bote.line_tip().unwrap();
    assert_eq!((bote.length, bote.angle), (10.0, 0.55));
    let kante = PrimitiveKind::Kante.line_tip().unwrap();
    assert_eq!(kante.length, 20.0);
    assert!((kante.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!(PrimitiveKind::StartHold.line_tip().is_none());
}
