//! Routing of record write events to the pipelines.

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    foundation::error::{WallprintError, WallprintResult},
    model::records::{BASE_PICTURES, BasePictureRecord, PROBLEMS, ProblemRecord},
    pipeline::PipelineContext,
    pipeline::base_picture::{cleanup_base_picture, process_base_picture},
    pipeline::problem::{cleanup_problem, process_problem},
};

/// A document write, carrying the document data after the write (before it, for deletes).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RecordEvent {
    Created {
        collection: String,
        id: String,
        data: serde_json::Value,
    },
    Updated {
        collection: String,
        id: String,
        data: serde_json::Value,
    },
    Deleted {
        collection: String,
        id: String,
        data: serde_json::Value,
    },
}

impl RecordEvent {
    pub fn collection(&self) -> &str {
        match self {
            Self::Created { collection, .. }
            | Self::Updated { collection, .. }
            | Self::Deleted { collection, .. } => collection,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Created { id, .. } | Self::Updated { id, .. } | Self::Deleted { id, .. } => id,
        }
    }

    pub fn data(&self) -> &serde_json::Value {
        match self {
            Self::Created { data, .. } | Self::Updated { data, .. } | Self::Deleted { data, .. } => {
                data
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchAction {
    ProcessedBasePicture,
    ProcessedProblem,
    CleanedUp,
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DispatchOutcome {
    pub collection: String,
    pub id: String,
    pub action: DispatchAction,
    pub message: String,
}

/// Options for [`Dispatcher::handle_all`].
#[derive(Clone, Debug, Default)]
pub struct DispatchOpts {
    /// Handle events concurrently on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct Dispatcher {
    ctx: PipelineContext,
}

impl Dispatcher {
    pub fn new(ctx: PipelineContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &PipelineContext {
        &self.ctx
    }

    /// Route one event. Pipeline failures are returned; cleanup never fails.
    #[tracing::instrument(skip(self, event), fields(event = event.kind(), collection = event.collection(), id = event.id()))]
    pub fn handle(&self, event: &RecordEvent) -> WallprintResult<DispatchOutcome> {
        let outcome = |action: DispatchAction, message: String| DispatchOutcome {
            collection: event.collection().to_string(),
            id: event.id().to_string(),
            action,
            message,
        };
        let id = event.id();

        match (event.collection(), event) {
            (BASE_PICTURES, RecordEvent::Created { data, .. }) => {
                let record = BasePictureRecord::from_json(data)?;
                let done = process_base_picture(&self.ctx, id, &record)?;
                Ok(outcome(
                    DispatchAction::ProcessedBasePicture,
                    format!("trimmed picture at {}", done.picture_path),
                ))
            }
            (BASE_PICTURES, RecordEvent::Updated { .. }) => Ok(outcome(
                DispatchAction::Ignored,
                "base pictures are immutable once created".to_string(),
            )),
            (BASE_PICTURES, RecordEvent::Deleted { data, .. }) => {
                let record = BasePictureRecord::from_json(data)?;
                let report = cleanup_base_picture(&self.ctx, id, &record);
                Ok(outcome(DispatchAction::CleanedUp, report.message()))
            }
            (PROBLEMS, RecordEvent::Created { data, .. } | RecordEvent::Updated { data, .. }) => {
                let record = ProblemRecord::from_json(data)?;
                if !record.image_required {
                    return Ok(outcome(
                        DispatchAction::Ignored,
                        "problem image not required".to_string(),
                    ));
                }
                let done = process_problem(&self.ctx, id, &record)?;
                Ok(outcome(
                    DispatchAction::ProcessedProblem,
                    format!(
                        "drew {} primitives into {}",
                        done.primitive_count, done.completed_path
                    ),
                ))
            }
            (PROBLEMS, RecordEvent::Deleted { .. }) => {
                let report = cleanup_problem(&self.ctx, id);
                Ok(outcome(DispatchAction::CleanedUp, report.message()))
            }
            (other, _) => {
                tracing::debug!(collection = other, "no handler for collection");
                Ok(outcome(
                    DispatchAction::Ignored,
                    format!("no handler for collection '{other}'"),
                ))
            }
        }
    }

    /// Handle independent events, one result per event in input order.
    ///
    /// A failing event does not affect the others. Only building the thread pool can fail
    /// the whole batch.
    pub fn handle_all(
        &self,
        events: &[RecordEvent],
        opts: &DispatchOpts,
    ) -> WallprintResult<Vec<WallprintResult<DispatchOutcome>>> {
        if !opts.parallel {
            return Ok(events.iter().map(|e| self.handle(e)).collect());
        }
        let pool = build_thread_pool(opts.threads)?;
        Ok(pool.install(|| events.par_iter().map(|e| self.handle(e)).collect()))
    }
}

fn build_thread_pool(threads: Option<usize>) -> WallprintResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WallprintError::validation(
            "dispatch 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    let pool = builder.build().context("build rayon thread pool")?;
    Ok(pool)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/dispatch.rs"]
mod tests;
