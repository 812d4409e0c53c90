//! Processing knobs shared by both pipelines.
//!
//! Every field has a default. A JSON file may override any subset, and `WALLPRINT_*`
//! environment variables override the file.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{WallprintError, WallprintResult},
    geometry::annotation::TextHeight,
    geometry::crop::TrimScale,
    render::text::LabelFont,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Target size of the trimmed base picture (see `trim_scale`).
    pub trimmed_height: u32,
    /// Edge of the square thumbnails.
    pub thumb_size: u32,
    pub trim_scale: TrimScale,
    pub trimmed_prefix: String,
    pub thumb_prefix: String,
    pub completed_prefix: String,
    /// Blob directory for problem images and their thumbnails.
    pub problem_image_dir: String,
    pub jpeg_quality: u8,
    /// TTF/OTF used for primitive labels.
    pub label_font_path: Option<PathBuf>,
    /// Look up an installed system font when `label_font_path` is unset. With neither,
    /// labelled primitives fail to render.
    pub system_label_font: bool,
    pub text_height: TextHeight,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            trimmed_height: 1200,
            thumb_size: 200,
            trim_scale: TrimScale::LongEdge,
            trimmed_prefix: "trimmed_".to_string(),
            thumb_prefix: "thumb_".to_string(),
            completed_prefix: "completed_".to_string(),
            problem_image_dir: "problemImages".to_string(),
            jpeg_quality: 92,
            label_font_path: None,
            system_label_font: true,
            text_height: TextHeight::Approximate,
        }
    }
}

impl ProcessingConfig {
    pub fn from_json_str(text: &str) -> WallprintResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| WallprintError::validation(format!("processing config: {e}")))
    }

    pub fn from_json_file(path: &Path) -> WallprintResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Defaults (or `path`), then environment overrides, then validation.
    pub fn load(path: Option<&Path>) -> WallprintResult<Self> {
        let cfg = match path {
            Some(p) => Self::from_json_file(p)?,
            None => Self::default(),
        };
        let cfg = cfg.with_overrides(|key| std::env::var(key).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `WALLPRINT_*` overrides read through `lookup`. Unparsable values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            let raw = lookup(key)?;
            let v = raw.trim().parse::<T>().ok();
            if v.is_none() {
                tracing::warn!(key, value = %raw, "ignoring unparsable override");
            }
            v
        }

        if let Some(v) = parsed(&lookup, "WALLPRINT_TRIMMED_HEIGHT") {
            self.trimmed_height = v;
        }
        if let Some(v) = parsed(&lookup, "WALLPRINT_THUMB_SIZE") {
            self.thumb_size = v;
        }
        if let Some(v) = parsed(&lookup, "WALLPRINT_JPEG_QUALITY") {
            self.jpeg_quality = v;
        }
        if let Some(raw) = lookup("WALLPRINT_TRIM_SCALE") {
            match raw.trim() {
                "long_edge" => self.trim_scale = TrimScale::LongEdge,
                "height" => self.trim_scale = TrimScale::Height,
                other => tracing::warn!(value = other, "ignoring unknown WALLPRINT_TRIM_SCALE"),
            }
        }
        if let Some(v) = parsed(&lookup, "WALLPRINT_SYSTEM_LABEL_FONT") {
            self.system_label_font = v;
        }
        if let Some(raw) = lookup("WALLPRINT_LABEL_FONT").filter(|v| !v.trim().is_empty()) {
            self.label_font_path = Some(PathBuf::from(raw));
        }
        self
    }

    pub fn validate(&self) -> WallprintResult<()> {
        if self.trimmed_height == 0 {
            return Err(WallprintError::validation("trimmed_height must be > 0"));
        }
        if self.thumb_size == 0 {
            return Err(WallprintError::validation("thumb_size must be > 0"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(WallprintError::validation(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        for (name, v) in [
            ("trimmed_prefix", &self.trimmed_prefix),
            ("thumb_prefix", &self.thumb_prefix),
            ("completed_prefix", &self.completed_prefix),
            ("problem_image_dir", &self.problem_image_dir),
        ] {
            if v.is_empty() {
                return Err(WallprintError::validation(format!("{name} must not be empty")));
            }
        }
        if self.trimmed_prefix == self.thumb_prefix {
            return Err(WallprintError::validation(
                "trimmed_prefix and thumb_prefix must differ",
            ));
        }
        Ok(())
    }

    /// The configured label font file, else a system font when allowed.
    pub fn read_label_font(&self) -> WallprintResult<Option<LabelFont>> {
        if let Some(path) = self.label_font_path.as_deref() {
            let font = LabelFont::from_path(path)?;
            tracing::debug!(family = font.family(), path = %path.display(), "loaded label font");
            return Ok(Some(font));
        }
        if !self.system_label_font {
            return Ok(None);
        }
        let font = LabelFont::system();
        match &font {
            Some(f) => tracing::info!(family = f.family(), "using system label font"),
            None => tracing::warn!("no label font configured or installed; labelled primitives will fail"),
        }
        Ok(font)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
