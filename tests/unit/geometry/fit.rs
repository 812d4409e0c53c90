use super::*;

#[test]
fn wide_source_is_letterboxed() {
    let fit = fit_square(400, 100, 200).unwrap();
    assert_eq!(fit.scale, 0.5);
    assert_eq!((fit.dw, fit.dh), (200.0, 50.0));
    assert_eq!((fit.dx, fit.dy), (0.0, 75.0));
}

#[test]
fn tall_source_is_pillarboxed() {
    let fit = fit_square(300, 1200, 200).unwrap();
    for (got, want) in [(fit.dw, 50.0), (fit.dh, 200.0), (fit.dx, 75.0), (fit.dy, 0.0)] {
        assert!((got - want).abs() < 1e-9, "{got} vs {want}");
    }
}

#[test]
fn small_source_is_upscaled() {
    let fit = fit_square(50, 100, 200).unwrap();
    assert_eq!(fit.scale, 2.0);
    assert_eq!((fit.dx, fit.dy), (50.0, 0.0));
}

#[test]
fn transform_maps_source_corners() {
    let fit = fit_square(400, 100, 200).unwrap();
    let p = fit.transform() * kurbo::Point::new(400.0, 100.0);
    assert_eq!(p, kurbo::Point::new(200.0, 125.0));
}

#[test]
fn zero_dimensions_fail() {
    assert!(matches!(
        fit_square(0, 100, 200),
        Err(WallprintError::InvalidImageDimensions { .. })
    ));
}
