use super::*;

#[test]
fn resolve_combines_exif_and_user_rotation() {
    assert_eq!(
        resolve_angle(Some(6), RotationAngle::Deg90),
        RotationAngle::Deg180
    );
    assert_eq!(resolve_angle(None, RotationAngle::Deg270), RotationAngle::Deg270);
    assert_eq!(resolve_angle(Some(3), RotationAngle::Deg180), RotationAngle::Deg0);
    assert_eq!(resolve_angle(Some(8), RotationAngle::Deg180), RotationAngle::Deg90);
}

#[test]
fn unsupported_codes_degrade_to_user_rotation() {
    for code in [Some(2), Some(5), Some(7), Some(42), None] {
        assert_eq!(resolve_angle(code, RotationAngle::Deg90), RotationAngle::Deg90);
    }
    assert!(matches!(
        exif_angle(Some(5)),
        Err(WallprintError::OrientationUnsupported(Some(5)))
    ));
    assert!(exif_angle(None).is_err());
    assert_eq!(exif_angle(Some(1)).unwrap(), RotationAngle::Deg0);
}

#[test]
fn rotation_serializes_as_degrees() {
    let a: RotationAngle = serde_json::from_str("270").unwrap();
    assert_eq!(a, RotationAngle::Deg270);
    assert_eq!(serde_json::to_string(&RotationAngle::Deg90).unwrap(), "90");
    assert!(serde_json::from_str::<RotationAngle>("45").is_err());
    assert!(serde_json::from_str::<RotationAngle>("-90").is_err());
}

#[test]
fn axis_swap_and_radians() {
    assert!(!RotationAngle::Deg0.swaps_axes());
    assert!(RotationAngle::Deg90.swaps_axes());
    assert!(!RotationAngle::Deg180.swaps_axes());
    assert!(RotationAngle::Deg270.swaps_axes());
    assert!((RotationAngle::Deg180.radians() - std::f64::consts::PI).abs() < 1e-12);
}
