use super::*;
use crate::foundation::core::{Canvas, Point};

const DEJAVU: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fonts/DejaVuSans.ttf");

fn dejavu() -> TextShaper {
    TextShaper::from_path(Path::new(DEJAVU)).unwrap()
}

/// `(min_x, min_y, max_x, max_y)` of pixels with alpha above half.
fn ink_bounds(img: &crate::assets::RasterImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..img.height {
        for x in 0..img.width {
            if img.pixel(x, y).unwrap()[3] > 128 {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    bounds
}

#[test]
fn missing_font_makes_labels_a_render_error() {
    let err = NoLabelFont.measure("ボテ", 60.0).unwrap_err();
    assert!(matches!(err, WallprintError::Render(_)));
    assert!(err.to_string().contains("ボテ"));
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let err = TextShaper::new(b"not a font".to_vec()).unwrap_err();
    assert!(matches!(err, WallprintError::Render(_)));
    assert!(LabelFont::new(b"not a font".to_vec()).is_err());
}

#[test]
fn unreadable_font_path_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("meiryo.ttf");
    let err = TextShaper::from_path(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("meiryo.ttf"));
}

#[test]
fn label_font_knows_its_family() {
    let font = LabelFont::from_path(Path::new(DEJAVU)).unwrap();
    assert_eq!(font.family(), "DejaVu Sans");
    assert_eq!(font.shaper().unwrap().family_name(), "DejaVu Sans");

    let bytes = std::fs::read(DEJAVU).unwrap();
    let err = LabelFont::with_index(bytes, 3).unwrap_err();
    assert!(matches!(err, WallprintError::Render(_)));
}

#[test]
fn measures_real_font_metrics() {
    let mut shaper = dejavu();
    let m = shaper.measure("S", 60.0).unwrap();
    assert!((30.0..46.0).contains(&m.width), "width {}", m.width);
    assert!((50.0..60.0).contains(&m.ascent), "ascent {}", m.ascent);
    assert!((10.0..18.0).contains(&m.descent), "descent {}", m.descent);

    assert!(shaper.measure("SGS", 60.0).unwrap().width > 2.0 * m.width);
    let h = crate::geometry::annotation::TextHeight::Metrics.resolve("S", &m);
    assert!((h - (m.ascent + m.descent)).abs() < 1e-9);
}

#[test]
fn non_positive_font_size_is_rejected() {
    let err = dejavu().measure("G", 0.0).unwrap_err();
    assert!(matches!(err, WallprintError::Validation(_)));
}

#[test]
fn label_ink_starts_at_origin_and_centers_on_it() {
    let mut shaper = dejavu();
    let width = shaper.measure("S", 60.0).unwrap().width;
    let label = LabelPlan {
        text: "S",
        font_size: 60.0,
        origin: Point::new(20.0, 60.0),
        width,
        height: width,
    };
    let mut surface = CpuSurface::new(Canvas::new(160, 120).unwrap()).unwrap();
    shaper
        .draw_label(&mut surface, &label, Rgb8::new(255, 0, 0))
        .unwrap();
    let img = surface.finish();

    let (x0, y0, x1, y1) = ink_bounds(&img).expect("label drew nothing");
    assert!((20..32).contains(&x0), "ink starts at x={x0}");
    assert!(f64::from(x1) <= 20.0 + width + 1.0, "ink ends at x={x1}");
    let middle = f64::from(y0 + y1) / 2.0;
    assert!((middle - 60.0).abs() <= 4.0, "ink spans y {y0}..{y1}");
}
