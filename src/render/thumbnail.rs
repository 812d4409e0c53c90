use crate::{
    assets::RasterImage,
    foundation::core::Canvas,
    foundation::error::WallprintResult,
    geometry::fit::fit_square,
    render::cpu::CpuSurface,
};

/// Fit `source` centered into a transparent `size x size` square.
pub fn make_thumbnail(source: &RasterImage, size: u32) -> WallprintResult<RasterImage> {
    let fit = fit_square(source.width, source.height, size)?;
    tracing::debug!(
        width = source.width,
        height = source.height,
        scale = fit.scale,
        dx = fit.dx,
        dy = fit.dy,
        "fitted thumbnail"
    );
    let mut surface = CpuSurface::new(Canvas::new(size, size)?)?;
    surface.draw_image(source, fit.transform())?;
    Ok(surface.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/render/thumbnail.rs"]
mod tests;
