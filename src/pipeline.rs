//! Orchestrators that turn record events into uploaded artifacts.
//!
//! Each invocation downloads its inputs, renders, uploads every artifact and only then
//! updates the record, so a failure never leaves a record pointing at missing blobs.

use std::sync::Arc;

use crate::{
    config::ProcessingConfig,
    foundation::error::WallprintResult,
    render::text::{LabelFont, TextShaper},
    store::{BlobStore, OrientationReader, RecordStore},
};

pub mod base_picture;
pub mod cleanup;
pub mod dispatch;
pub mod naming;
pub mod problem;

/// Collaborators and settings shared by every pipeline invocation.
#[derive(Clone)]
pub struct PipelineContext {
    pub blobs: Arc<dyn BlobStore>,
    pub records: Arc<dyn RecordStore>,
    pub exif: Arc<dyn OrientationReader>,
    pub config: ProcessingConfig,
    label_font: Option<LabelFont>,
}

impl std::fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineContext")
            .field("config", &self.config)
            .field("label_font", &self.label_font)
            .finish_non_exhaustive()
    }
}

impl PipelineContext {
    /// Validates `config` and resolves its label font.
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        records: Arc<dyn RecordStore>,
        exif: Arc<dyn OrientationReader>,
        config: ProcessingConfig,
    ) -> WallprintResult<Self> {
        config.validate()?;
        let label_font = config.read_label_font()?;
        Ok(Self {
            blobs,
            records,
            exif,
            config,
            label_font,
        })
    }

    /// Use `font` for labels instead of the configured one.
    pub fn with_label_font(mut self, font: LabelFont) -> Self {
        self.label_font = Some(font);
        self
    }

    pub fn label_font(&self) -> Option<&LabelFont> {
        self.label_font.as_ref()
    }

    /// A fresh shaper per invocation keeps invocations independent of each other.
    pub(crate) fn label_shaper(&self) -> WallprintResult<Option<TextShaper>> {
        self.label_font.as_ref().map(LabelFont::shaper).transpose()
    }
}
