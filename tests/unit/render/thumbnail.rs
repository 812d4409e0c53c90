use super::*;
use crate::foundation::error::WallprintError;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RasterImage {
    RasterImage::new(w, h, rgba.repeat((w * h) as usize))
}

#[test]
fn wide_image_is_letterboxed_on_transparent() {
    let thumb = make_thumbnail(&solid(400, 100, [255, 0, 0, 255]), 200).unwrap();
    assert_eq!((thumb.width, thumb.height), (200, 200));
    assert_eq!(thumb.pixel(100, 100).unwrap(), [255, 0, 0, 255]);
    assert_eq!(thumb.pixel(100, 80).unwrap(), [255, 0, 0, 255]);
    assert_eq!(thumb.pixel(100, 10).unwrap(), [0, 0, 0, 0]);
    assert_eq!(thumb.pixel(100, 70).unwrap(), [0, 0, 0, 0]);
    assert_eq!(thumb.pixel(100, 190).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn tall_image_is_pillarboxed() {
    let thumb = make_thumbnail(&solid(50, 200, [0, 0, 255, 255]), 200).unwrap();
    assert_eq!(thumb.pixel(100, 100).unwrap(), [0, 0, 255, 255]);
    assert_eq!(thumb.pixel(10, 100).unwrap()[3], 0);
    assert_eq!(thumb.pixel(190, 100).unwrap()[3], 0);
}

#[test]
fn empty_source_is_rejected() {
    let err = make_thumbnail(&RasterImage::new(0, 10, Vec::new()), 200).unwrap_err();
    assert!(matches!(err, WallprintError::InvalidImageDimensions { .. }));
}
