//! Uploaded wall photo -> trimmed picture + thumbnail.

use crate::{
    assets::decode::{decode_image, sniff_format},
    assets::encode::{OutputFormat, encode_image},
    foundation::error::{WallprintError, WallprintResult},
    geometry::crop::plan_crop,
    geometry::orientation::{RotationAngle, resolve_angle},
    model::records::{BASE_PICTURES, BasePictureRecord, BasePictureUpdate, to_patch},
    pipeline::PipelineContext,
    pipeline::cleanup::CleanupReport,
    pipeline::naming::{BaseArtifacts, base_thumb_path, trimmed_path},
    render::compose::compose_trimmed,
    render::thumbnail::make_thumbnail,
    store::{DeleteOutcome, DownloadFile, UploadFile},
};

/// What a processed base picture produced.
#[derive(Clone, Debug, PartialEq)]
pub struct BasePictureOutcome {
    pub angle: RotationAngle,
    pub picture_path: String,
    pub picture_url: String,
    pub thumbnail_path: String,
    pub thumbnail_url: String,
    /// Result of removing the original upload after the record was updated.
    pub original_removed: DeleteOutcome,
}

/// Trim, rotate and thumbnail the upload named by `record.original_path`.
///
/// The record is updated only after both artifacts are uploaded. Any failure before that
/// leaves the record untouched; the original is deleted last and only on success.
#[tracing::instrument(skip(ctx, record), fields(original = %record.original_path))]
pub fn process_base_picture(
    ctx: &PipelineContext,
    id: &str,
    record: &BasePictureRecord,
) -> WallprintResult<BasePictureOutcome> {
    let cfg = &ctx.config;
    if record.original_path.is_empty() {
        return Err(WallprintError::validation(format!(
            "base picture '{id}' has no originalPath"
        )));
    }

    let mut original = DownloadFile::fetch(ctx.blobs.as_ref(), &record.original_path)?;
    let bytes = original.read()?;
    let exif = ctx.exif.read_orientation(&bytes);
    let angle = resolve_angle(exif, record.rotation);

    let source = decode_image(&bytes)?;
    let plan = plan_crop(
        angle,
        &record.trim(),
        source.width,
        source.height,
        cfg.trimmed_height,
        cfg.trim_scale,
    )?;
    tracing::debug!(
        ?exif,
        angle = angle.degrees(),
        crop = ?plan.source,
        width = plan.canvas.width,
        height = plan.canvas.height,
        "planned trim"
    );
    let trimmed = compose_trimmed(&source, &plan)?;

    let format = OutputFormat::matching(sniff_format(&bytes), cfg.jpeg_quality);
    let mut picture = UploadFile::new(trimmed_path(cfg, original.storage_path()))?;
    picture.write(&encode_image(&trimmed, format)?)?;
    let picture_url = picture.upload_as(ctx.blobs.as_ref(), format.content_type())?;

    // Thumbnail from the encoded trimmed image, so it matches what clients download.
    let staged = decode_image(&picture.read()?)?;
    let thumb = make_thumbnail(&staged, cfg.thumb_size)?;
    let mut thumbnail = UploadFile::new(base_thumb_path(cfg, original.storage_path()))?;
    thumbnail.write(&encode_image(&thumb, OutputFormat::Png)?)?;
    let thumbnail_url =
        thumbnail.upload_as(ctx.blobs.as_ref(), OutputFormat::Png.content_type())?;

    let update = BasePictureUpdate {
        original_path: String::new(),
        picture_path: picture.storage_path().to_string(),
        picture_url: picture_url.clone(),
        thumbnail_url: thumbnail_url.clone(),
    };
    ctx.records.update(BASE_PICTURES, id, &to_patch(&update)?)?;
    tracing::info!(id, picture = %update.picture_path, "base picture processed");

    let original_removed = ctx.blobs.delete(original.storage_path());
    if let DeleteOutcome::Failed(reason) = &original_removed {
        tracing::warn!(path = original.storage_path(), reason = %reason, "could not delete original upload");
    }

    Ok(BasePictureOutcome {
        angle,
        picture_path: update.picture_path,
        picture_url,
        thumbnail_path: thumbnail.storage_path().to_string(),
        thumbnail_url,
        original_removed,
    })
}

/// Remove the trimmed picture and thumbnail of a deleted base picture record.
#[tracing::instrument(skip(ctx, record))]
pub fn cleanup_base_picture(
    ctx: &PipelineContext,
    id: &str,
    record: &BasePictureRecord,
) -> CleanupReport {
    let Some(picture_path) = record.picture_path.as_deref().filter(|p| !p.is_empty()) else {
        return CleanupReport::skipped("base picture was never processed");
    };
    let Some(artifacts) = BaseArtifacts::from_picture_path(&ctx.config, picture_path) else {
        tracing::warn!(picture_path, "picture path has no trimmed prefix");
        return CleanupReport::skipped(format!("'{picture_path}' has no trimmed prefix"));
    };

    let mut report = CleanupReport::default();
    report.delete(ctx.blobs.as_ref(), "trimmed image", &artifacts.trimmed);
    report.delete(ctx.blobs.as_ref(), "thumbnail", &artifacts.thumbnail);
    report
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/base_picture.rs"]
mod tests;
