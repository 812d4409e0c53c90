//! Collaborator seams: blob storage, document storage and EXIF reading.
//!
//! Pipelines receive these as trait objects, so they carry no global state and run against
//! the in-memory fakes in tests.

use crate::foundation::error::WallprintResult;

pub mod blob;
pub mod exif;
pub mod record;
pub mod scoped;

pub use blob::{FsBlobStore, MemoryBlobStore};
pub use exif::{FixedOrientation, ImageExifReader};
pub use record::{FsRecordStore, MemoryRecordStore};
pub use scoped::{DownloadFile, UploadFile};

/// Result of a best-effort blob delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing was stored at the path.
    Missing,
    Failed(String),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// Binary object storage addressed by slash-separated paths.
pub trait BlobStore: Send + Sync {
    /// Fails with [`crate::WallprintError::SourceNotFound`] when nothing is stored at `path`.
    fn download(&self, path: &str) -> WallprintResult<Vec<u8>>;

    /// Store `bytes` at `path` (replacing any previous blob) and return a public URL.
    fn upload(&self, bytes: &[u8], path: &str, content_type: &str) -> WallprintResult<String>;

    /// Idempotent: deleting an absent blob reports [`DeleteOutcome::Missing`].
    fn delete(&self, path: &str) -> DeleteOutcome;
}

/// JSON document storage with one level of ordered sub-collections.
pub trait RecordStore: Send + Sync {
    fn get(&self, collection: &str, id: &str) -> WallprintResult<Option<serde_json::Value>>;

    /// Shallow-merge the fields of `patch` (a JSON object) into an existing document.
    fn update(&self, collection: &str, id: &str, patch: &serde_json::Value) -> WallprintResult<()>;

    /// Documents of `collection/id/sub`, in store iteration order.
    fn list_children(
        &self,
        collection: &str,
        id: &str,
        sub: &str,
    ) -> WallprintResult<Vec<serde_json::Value>>;
}

/// Reads the EXIF orientation code of encoded image bytes. Never fails.
pub trait OrientationReader: Send + Sync {
    fn read_orientation(&self, bytes: &[u8]) -> Option<u16>;
}

/// Split a blob path into `(dir, file_name)`; `dir` is empty for top-level blobs.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => ("", path),
    }
}

/// Join a directory and a file name the way [`split_path`] splits them.
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// File name without its last extension (`"IMG_1.JPG"` -> `"IMG_1"`).
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(i) => &name[..i],
    }
}

pub(crate) fn merge_patch(
    doc: &mut serde_json::Value,
    patch: &serde_json::Value,
) -> WallprintResult<()> {
    let (Some(doc), Some(patch)) = (doc.as_object_mut(), patch.as_object()) else {
        return Err(crate::foundation::error::WallprintError::store(
            "record update requires JSON objects",
        ));
    };
    for (k, v) in patch {
        doc.insert(k.clone(), v.clone());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/store/paths.rs"]
mod tests;
