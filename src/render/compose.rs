use crate::{
    assets::RasterImage,
    foundation::error::WallprintResult,
    geometry::crop::CropPlan,
    render::cpu::CpuSurface,
};

/// Draw the planned crop of `source` into a fresh canvas.
///
/// The plan's transform maps the crop rectangle exactly onto the canvas, so pixels outside
/// the crop land off-canvas and are clipped.
pub fn compose_trimmed(source: &RasterImage, plan: &CropPlan) -> WallprintResult<RasterImage> {
    let mut surface = CpuSurface::new(plan.canvas)?;
    surface.draw_image(source, plan.transform)?;
    Ok(surface.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
