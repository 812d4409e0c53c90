//! Burning annotation primitives into a problem image.

use crate::{
    assets::RasterImage,
    foundation::core::{Affine, Vec2},
    foundation::error::{WallprintError, WallprintResult},
    geometry::annotation::{PrimitivePlan, TextHeight, plan_primitive},
    geometry::trim::{TrimSpec, offset_crop},
    model::primitive::Primitive,
    render::cpu::CpuSurface,
    render::text::{NoLabelFont, TextShaper},
};

/// Draw `primitives` in order, each shifted by `offset`.
///
/// Without a `shaper`, any primitive that carries a label fails with a render error.
pub fn draw_primitives(
    surface: &mut CpuSurface,
    primitives: &[Primitive],
    offset: Vec2,
    mut shaper: Option<&mut TextShaper>,
    text_height: TextHeight,
) -> WallprintResult<()> {
    for primitive in primitives {
        let plan = match shaper.as_deref_mut() {
            Some(s) => plan_primitive(primitive, offset, s, text_height)?,
            None => plan_primitive(primitive, offset, &mut NoLabelFont, text_height)?,
        };
        draw_plan(surface, &plan, shaper.as_deref_mut())?;
    }
    Ok(())
}

fn draw_plan(
    surface: &mut CpuSurface,
    plan: &PrimitivePlan,
    shaper: Option<&mut TextShaper>,
) -> WallprintResult<()> {
    if let Some(circle) = plan.circle {
        surface.stroke_circle(circle.center, circle.radius, plan.color, plan.stroke_width);
    }
    if let Some(label) = &plan.label {
        let shaper = shaper.ok_or_else(|| {
            WallprintError::render(format!("label '{}' needs a label font", label.text))
        })?;
        shaper.draw_label(surface, label, plan.color)?;
    }
    if let Some(line) = &plan.line {
        surface.stroke_path(&line.to_path(), plan.color, plan.stroke_width);
    }
    Ok(())
}

/// Crop `base` by the problem's trim fractions and draw `primitives` on top.
///
/// Primitive positions are relative to the uncropped base picture.
#[tracing::instrument(skip(base, primitives, shaper), fields(count = primitives.len()))]
pub fn render_problem(
    base: &RasterImage,
    trim: &TrimSpec,
    primitives: &[Primitive],
    shaper: Option<&mut TextShaper>,
    text_height: TextHeight,
) -> WallprintResult<RasterImage> {
    let crop = offset_crop(base.width, base.height, trim)?;
    let mut surface = CpuSurface::new(crop.canvas)?;
    surface.draw_image(base, Affine::translate(crop.offset))?;
    draw_primitives(&mut surface, primitives, crop.offset, shaper, text_height)?;
    Ok(surface.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/render/primitives.rs"]
mod tests;
