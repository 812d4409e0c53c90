//! Best-effort removal of derived artifacts.

use crate::store::{BlobStore, DeleteOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanupEntry {
    /// Human name of the artifact, e.g. `"trimmed image"`.
    pub label: &'static str,
    pub path: String,
    pub outcome: DeleteOutcome,
}

/// Per-artifact delete outcomes. Building one never fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub entries: Vec<CleanupEntry>,
    /// Why nothing was attempted, when that is the case.
    pub note: Option<String>,
}

impl CleanupReport {
    pub fn skipped(note: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            note: Some(note.into()),
        }
    }

    /// Delete `path`, recording the outcome. A failure is logged and does not stop later deletes.
    pub fn delete(&mut self, blobs: &dyn BlobStore, label: &'static str, path: &str) {
        let outcome = blobs.delete(path);
        match &outcome {
            DeleteOutcome::Deleted => tracing::info!(path, label, "deleted artifact"),
            DeleteOutcome::Missing => tracing::debug!(path, label, "artifact already absent"),
            DeleteOutcome::Failed(reason) => {
                tracing::warn!(path, label, reason = %reason, "could not delete artifact")
            }
        }
        self.entries.push(CleanupEntry {
            label,
            path: path.to_string(),
            outcome,
        });
    }

    pub fn deleted_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_deleted()).count()
    }

    /// Status line such as `"deleted trimmed image, deleted thumbnail"`.
    pub fn message(&self) -> String {
        if let Some(note) = &self.note
            && self.entries.is_empty()
        {
            return note.clone();
        }

        let mut parts: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.outcome.is_deleted())
            .map(|e| format!("deleted {}", e.label))
            .collect();
        if parts.is_empty() {
            parts.push("no images were deleted".to_string());
        }
        for e in &self.entries {
            if let DeleteOutcome::Failed(reason) = &e.outcome {
                parts.push(format!("failed to delete {} ({reason})", e.label));
            }
        }
        parts.join(", ")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/cleanup.rs"]
mod tests;
