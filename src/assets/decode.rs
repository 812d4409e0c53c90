use std::io::Cursor;

use image::ImageDecoder;

use crate::{
    assets::RasterImage,
    foundation::error::{WallprintError, WallprintResult},
    foundation::math::premultiply_rgba8_in_place,
};

pub fn decode_image(bytes: &[u8]) -> WallprintResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| WallprintError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(WallprintError::InvalidImageDimensions { width, height });
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(RasterImage::new(width, height, rgba8_premul))
}

/// Container format of encoded bytes, from their magic number.
pub fn sniff_format(bytes: &[u8]) -> Option<image::ImageFormat> {
    image::guess_format(bytes).ok()
}

/// EXIF orientation code (1..=8) stored in the image, if any.
///
/// Never fails: unreadable containers and missing tags both yield `None`.
pub fn exif_orientation(bytes: &[u8]) -> Option<u16> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let mut decoder = reader.into_decoder().ok()?;
    let chunk = decoder.exif_metadata().ok()??;
    let orientation = image::metadata::Orientation::from_exif_chunk(&chunk)?;
    Some(orientation_code(orientation))
}

fn orientation_code(o: image::metadata::Orientation) -> u16 {
    use image::metadata::Orientation;
    match o {
        Orientation::NoTransforms => 1,
        Orientation::FlipHorizontal => 2,
        Orientation::Rotate180 => 3,
        Orientation::FlipVertical => 4,
        Orientation::Rotate90FlipH => 5,
        Orientation::Rotate90 => 6,
        Orientation::Rotate270FlipH => 7,
        Orientation::Rotate270 => 8,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
