//! Deterministic image processing for climbing-wall photos.
//!
//! A wall photo is rotated upright (EXIF plus user rotation), trimmed by fractional margins
//! and scaled to a fixed size, then thumbnailed into a transparent square. Problems (routes)
//! are composited by drawing their hold markers, arrows and labels over the trimmed picture.
//!
//! Storage is reached only through the [`BlobStore`] and [`RecordStore`] seams; the
//! [`Dispatcher`] routes record write events to the two pipelines.

#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod geometry;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod store;

pub use assets::RasterImage;
pub use assets::decode::{decode_image, exif_orientation, sniff_format};
pub use assets::encode::{OutputFormat, content_type_for, encode_image};
pub use config::ProcessingConfig;
pub use foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgb8, Vec2};
pub use foundation::error::{WallprintError, WallprintResult};
pub use geometry::annotation::{PrimitivePlan, TextHeight, TextMeasure, TextMetrics, plan_primitive};
pub use geometry::crop::{CropPlan, TrimScale, plan_crop};
pub use geometry::fit::{SquareFit, fit_square};
pub use geometry::orientation::{RotationAngle, exif_angle, resolve_angle};
pub use geometry::trim::{OffsetCrop, TrimSpec, offset_crop};
pub use model::primitive::{Placement, Primitive, PrimitiveKind, PrimitiveRecord, SizeClass};
pub use model::records::{BasePictureRecord, ProblemRecord};
pub use pipeline::PipelineContext;
pub use pipeline::base_picture::{BasePictureOutcome, cleanup_base_picture, process_base_picture};
pub use pipeline::cleanup::CleanupReport;
pub use pipeline::dispatch::{
    DispatchAction, DispatchOpts, DispatchOutcome, Dispatcher, RecordEvent,
};
pub use pipeline::problem::{ProblemOutcome, cleanup_problem, process_problem};
pub use render::compose::compose_trimmed;
pub use render::cpu::CpuSurface;
pub use render::primitives::{draw_primitives, render_problem};
pub use render::text::{LabelFont, TextShaper};
pub use render::thumbnail::make_thumbnail;
pub use store::{
    BlobStore, DeleteOutcome, DownloadFile, FixedOrientation, FsBlobStore, FsRecordStore,
    ImageExifReader, MemoryBlobStore, MemoryRecordStore, OrientationReader, RecordStore,
    UploadFile,
};
