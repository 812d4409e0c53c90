//! Problem record -> composited route image + thumbnail.

use crate::{
    assets::decode::decode_image,
    assets::encode::{OutputFormat, encode_image},
    foundation::error::{WallprintError, WallprintResult},
    model::primitive::Primitive,
    model::records::{PRIMITIVES, PROBLEMS, ProblemRecord, ProblemUpdate, to_patch},
    pipeline::PipelineContext,
    pipeline::cleanup::CleanupReport,
    pipeline::naming::{completed_path, problem_thumb_path},
    render::primitives::render_problem,
    render::thumbnail::make_thumbnail,
    store::{DownloadFile, UploadFile},
};

#[derive(Clone, Debug, PartialEq)]
pub struct ProblemOutcome {
    pub primitive_count: usize,
    pub completed_path: String,
    pub completed_url: String,
    pub thumbnail_path: String,
    pub thumbnail_url: String,
}

/// Fetch the problem's primitives in store order, failing on the first malformed one.
pub fn load_primitives(ctx: &PipelineContext, id: &str) -> WallprintResult<Vec<Primitive>> {
    ctx.records
        .list_children(PROBLEMS, id, PRIMITIVES)?
        .iter()
        .map(Primitive::from_json)
        .collect()
}

/// Draw the problem's primitives over its cropped base picture and publish the result.
///
/// Both JPEGs are uploaded before the record is touched; the update clears `imageRequired`.
#[tracing::instrument(skip(ctx, record), fields(base = %record.base_picture_path))]
pub fn process_problem(
    ctx: &PipelineContext,
    id: &str,
    record: &ProblemRecord,
) -> WallprintResult<ProblemOutcome> {
    let cfg = &ctx.config;
    if record.base_picture_path.is_empty() {
        return Err(WallprintError::validation(format!(
            "problem '{id}' has no basePicturePath"
        )));
    }

    let mut base_file = DownloadFile::fetch(ctx.blobs.as_ref(), &record.base_picture_path)?;
    let base = decode_image(&base_file.read()?)?;
    let primitives = load_primitives(ctx, id)?;
    tracing::debug!(
        count = primitives.len(),
        width = base.width,
        height = base.height,
        "loaded problem inputs"
    );

    let mut shaper = ctx.label_shaper()?;
    let composite = render_problem(
        &base,
        &record.trim(),
        &primitives,
        shaper.as_mut(),
        cfg.text_height,
    )?;
    let jpeg = OutputFormat::Jpeg {
        quality: cfg.jpeg_quality,
    };

    let mut completed = UploadFile::new(completed_path(cfg, id))?;
    completed.write(&encode_image(&composite, jpeg)?)?;
    let completed_url = completed.upload(ctx.blobs.as_ref())?;

    let thumb = make_thumbnail(&composite, cfg.thumb_size)?;
    let mut thumbnail = UploadFile::new(problem_thumb_path(cfg, id))?;
    thumbnail.write(&encode_image(&thumb, jpeg)?)?;
    let thumbnail_url = thumbnail.upload(ctx.blobs.as_ref())?;

    let update = ProblemUpdate {
        image_required: false,
        completed_image_url: completed_url.clone(),
        completed_image_thumb_url: thumbnail_url.clone(),
    };
    ctx.records.update(PROBLEMS, id, &to_patch(&update)?)?;
    tracing::info!(id, primitives = primitives.len(), "problem image processed");

    Ok(ProblemOutcome {
        primitive_count: primitives.len(),
        completed_path: completed.storage_path().to_string(),
        completed_url,
        thumbnail_path: thumbnail.storage_path().to_string(),
        thumbnail_url,
    })
}

/// Remove the composite and thumbnail of a deleted problem.
#[tracing::instrument(skip(ctx))]
pub fn cleanup_problem(ctx: &PipelineContext, id: &str) -> CleanupReport {
    let mut report = CleanupReport::default();
    report.delete(
        ctx.blobs.as_ref(),
        "completed image",
        &completed_path(&ctx.config, id),
    );
    report.delete(
        ctx.blobs.as_ref(),
        "thumbnail",
        &problem_thumb_path(&ctx.config, id),
    );
    report
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/problem.rs"]
mod tests;
