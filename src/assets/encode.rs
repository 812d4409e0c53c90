use std::io::Cursor;

use anyhow::Context;
use image::ImageEncoder;

use crate::{
    assets::RasterImage,
    foundation::error::{WallprintError, WallprintResult},
    foundation::math::unpremultiply_rgba8_in_place,
};

/// Encoding of an uploaded artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// RGBA, alpha preserved.
    Png,
    /// RGB; transparent areas come out black.
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// Keep JPEG sources as JPEG; everything else is written as PNG.
    pub fn matching(source: Option<image::ImageFormat>, jpeg_quality: u8) -> Self {
        match source {
            Some(image::ImageFormat::Jpeg) => Self::Jpeg {
                quality: jpeg_quality,
            },
            _ => Self::Png,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }
}

pub fn encode_image(image: &RasterImage, format: OutputFormat) -> WallprintResult<Vec<u8>> {
    let (w, h) = (image.width, image.height);
    let expected = w as usize * h as usize * 4;
    if image.rgba8_premul.len() != expected {
        return Err(WallprintError::render(format!(
            "raster byte length {} does not match {w}x{h}",
            image.rgba8_premul.len()
        )));
    }

    let mut out = Vec::new();
    match format {
        OutputFormat::Png => {
            let mut rgba = image.rgba8_premul.as_ref().clone();
            unpremultiply_rgba8_in_place(&mut rgba);
            image::codecs::png::PngEncoder::new(Cursor::new(&mut out))
                .write_image(&rgba, w, h, image::ExtendedColorType::Rgba8)
                .context("encode png")?;
        }
        OutputFormat::Jpeg { quality } => {
            // Premultiplied color over black is the premultiplied color itself.
            let rgb: Vec<u8> = image
                .rgba8_premul
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut out), quality)
                .write_image(&rgb, w, h, image::ExtendedColorType::Rgb8)
                .context("encode jpeg")?;
        }
    }
    Ok(out)
}

/// Upload content type inferred from a blob path's extension.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "image",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
