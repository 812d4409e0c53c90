use super::*;
use crate::assets::decode::{decode_image, sniff_format};

fn half_transparent_red() -> RasterImage {
    // Premultiplied (255, 0, 0, 128) -> (128, 0, 0, 128).
    RasterImage::new(2, 2, [128u8, 0, 0, 128].repeat(4))
}

#[test]
fn png_keeps_straight_alpha() {
    let bytes = encode_image(&half_transparent_red(), OutputFormat::Png).unwrap();
    assert_eq!(sniff_format(&bytes), Some(image::ImageFormat::Png));

    let straight = image::load_from_memory(&bytes).unwrap().to_rgba8();
    let px = straight.get_pixel(1, 1).0;
    assert_eq!(px[3], 128);
    assert!(px[0] >= 254, "red channel {}", px[0]);

    // Decoding premultiplies again.
    let back = decode_image(&bytes).unwrap();
    assert_eq!(back.pixel(0, 0).unwrap()[3], 128);
}

#[test]
fn jpeg_flattens_onto_black() {
    let mut data = vec![0u8; 8 * 8 * 4];
    for px in data.chunks_exact_mut(4).take(32) {
        px.copy_from_slice(&[255, 255, 255, 255]);
    }
    let img = RasterImage::new(8, 8, data);
    let bytes = encode_image(&img, OutputFormat::Jpeg { quality: 95 }).unwrap();
    assert_eq!(sniff_format(&bytes), Some(image::ImageFormat::Jpeg));

    let rgb = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(rgb.dimensions(), (8, 8));
    assert!(rgb.get_pixel(4, 1).0.iter().all(|&c| c > 200));
    assert!(rgb.get_pixel(4, 6).0.iter().all(|&c| c < 55));
}

#[test]
fn mismatched_buffer_is_rejected() {
    let img = RasterImage::new(4, 4, vec![0; 8]);
    assert!(matches!(
        encode_image(&img, OutputFormat::Png),
        Err(WallprintError::Render(_))
    ));
}

#[test]
fn output_format_follows_source() {
    assert_eq!(
        OutputFormat::matching(Some(image::ImageFormat::Jpeg), 80),
        OutputFormat::Jpeg { quality: 80 }
    );
    assert_eq!(
        OutputFormat::matching(Some(image::ImageFormat::Gif), 80),
        OutputFormat::Png
    );
    assert_eq!(OutputFormat::matching(None, 80), OutputFormat::Png);
}

#[test]
fn content_types_by_extension() {
    assert_eq!(content_type_for("a/trimmed_IMG_1.JPG"), "image/jpeg");
    assert_eq!(content_type_for("a/b.jpeg"), "image/jpeg");
    assert_eq!(content_type_for("a/thumb_b.png"), "image/png");
    assert_eq!(content_type_for("b.gif"), "image/gif");
    assert_eq!(content_type_for("b.webp"), "image");
    assert_eq!(content_type_for("noext"), "image");
}

#[test]
fn output_format_names_its_content_type() {
    assert_eq!(OutputFormat::Png.content_type(), "image/png");
    assert_eq!(OutputFormat::Jpeg { quality: 80 }.content_type(), "image/jpeg");
    assert_eq!(OutputFormat::matching(Some(image::ImageFormat::WebP), 80).content_type(), "image/png");
}
