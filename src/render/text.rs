//! Label shaping with `parley` and glyph drawing through [`CpuSurface`].

use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::core::{Affine, Rgb8, Vec2},
    foundation::error::{WallprintError, WallprintResult},
    geometry::annotation::{LabelPlan, TextMeasure, TextMetrics},
    render::cpu::CpuSurface,
};

/// Shapes labels with a single registered font.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl TextShaper {
    /// Register `font_bytes` (TTF/OTF) as the label font.
    pub fn new(font_bytes: Vec<u8>) -> WallprintResult<Self> {
        Self::with_index(font_bytes, 0)
    }

    /// Register face `index` of `font_bytes` (a TTC may hold several faces).
    ///
    /// The shaper never consults system fonts, so every shaped glyph id belongs to this face.
    pub fn with_index(font_bytes: Vec<u8>, index: u32) -> WallprintResult<Self> {
        let mut font_ctx = parley::FontContext {
            collection: parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                shared: false,
                system_fonts: false,
            }),
            source_cache: parley::fontique::SourceCache::default(),
        };
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == index))
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                WallprintError::render(format!("label font bytes have no face {index}"))
            })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WallprintError::render("registered label font family has no name"))?
            .to_string();
        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), index);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    pub fn from_path(path: &Path) -> WallprintResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read label font '{}'", path.display()))?;
        Self::new(bytes)
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgb8,
    ) -> WallprintResult<parley::Layout<Rgb8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WallprintError::validation(
                "label font size must be finite and > 0",
            ));
        }
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgb8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Draw a planned label so that its em box is vertically centered on `label.origin.y`.
    pub fn draw_label(
        &mut self,
        surface: &mut CpuSurface,
        label: &LabelPlan,
        color: Rgb8,
    ) -> WallprintResult<()> {
        let layout = self.layout(label.text, label.font_size, color)?;
        let middle = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                f64::from(m.baseline) - f64::from(m.ascent - m.descent) / 2.0
            })
            .unwrap_or(0.0);
        let transform =
            Affine::translate(Vec2::new(label.origin.x, label.origin.y - middle));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                surface.fill_glyphs(
                    &self.font,
                    run.run().font_size(),
                    brush,
                    transform,
                    glyphs,
                );
            }
        }
        Ok(())
    }
}

impl TextMeasure for TextShaper {
    fn measure(&mut self, text: &str, font_size: f32) -> WallprintResult<TextMetrics> {
        let layout = self.layout(text, font_size, Rgb8::BLACK)?;
        let (ascent, descent) = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                (f64::from(m.ascent), f64::from(m.descent))
            })
            .unwrap_or((0.0, 0.0));
        Ok(TextMetrics {
            width: f64::from(layout.width()),
            ascent,
            descent,
        })
    }
}

/// Families tried, in order, when no label font file is configured.
const SYSTEM_LABEL_FAMILIES: &[&str] = &[
    "Meiryo UI",
    "Meiryo",
    "Yu Gothic UI",
    "Hiragino Sans",
    "Noto Sans CJK JP",
    "Noto Sans JP",
    "IPAexGothic",
    "IPAGothic",
];

/// Validated label font bytes, shared across invocations.
#[derive(Clone)]
pub struct LabelFont {
    bytes: Arc<Vec<u8>>,
    index: u32,
    family: String,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl LabelFont {
    pub fn new(bytes: Vec<u8>) -> WallprintResult<Self> {
        Self::with_index(bytes, 0)
    }

    pub fn with_index(bytes: Vec<u8>, index: u32) -> WallprintResult<Self> {
        let family = TextShaper::with_index(bytes.clone(), index)?
            .family_name()
            .to_string();
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            family,
        })
    }

    pub fn from_path(path: &Path) -> WallprintResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read label font '{}'", path.display()))?;
        Self::new(bytes)
    }

    /// First installed font among the Japanese UI families, then the system sans-serif
    /// fallbacks, then any installed family at all.
    pub fn system() -> Option<Self> {
        use parley::fontique::{Collection, CollectionOptions, GenericFamily};

        let mut collection = Collection::new(CollectionOptions {
            shared: false,
            system_fonts: true,
        });
        let mut candidates: Vec<_> = SYSTEM_LABEL_FAMILIES
            .iter()
            .filter_map(|name| collection.family_id(name))
            .collect();
        candidates.extend(collection.generic_families(GenericFamily::SansSerif));
        candidates.extend(collection.generic_families(GenericFamily::SystemUi));
        let any = collection.family_names().next().map(str::to_string);
        if let Some(name) = any
            && let Some(id) = collection.family_id(&name)
        {
            candidates.push(id);
        }

        candidates.into_iter().find_map(|id| {
            let family = collection.family(id)?;
            let font = family.default_font()?;
            let blob = font.load(None)?;
            Self::with_index(blob.data().to_vec(), font.index()).ok()
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// A fresh shaper; shapers carry layout caches and are not shared between invocations.
    pub fn shaper(&self) -> WallprintResult<TextShaper> {
        TextShaper::with_index(self.bytes.as_ref().clone(), self.index)
    }
}

/// Stand-in used when no label font is configured: any label is a render error.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLabelFont;

impl TextMeasure for NoLabelFont {
    fn measure(&mut self, text: &str, _font_size: f32) -> WallprintResult<TextMetrics> {
        Err(WallprintError::render(format!(
            "label '{text}' needs a label font but none is configured"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
