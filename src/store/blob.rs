use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Component, Path, PathBuf},
    sync::Mutex,
};

use crate::{
    foundation::error::{WallprintError, WallprintResult},
    store::{BlobStore, DeleteOutcome},
};

/// Blobs as files below a root directory; URLs are `file://` URLs of those files.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> WallprintResult<PathBuf> {
        let rel = Path::new(path);
        let clean = !path.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !clean {
            return Err(WallprintError::store(format!(
                "blob path '{path}' must be relative and stay below the store root"
            )));
        }
        Ok(self.root.join(rel))
    }
}

impl BlobStore for FsBlobStore {
    fn download(&self, path: &str) -> WallprintResult<Vec<u8>> {
        let full = self.resolve(path)?;
        std::fs::read(&full).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => WallprintError::SourceNotFound(path.to_string()),
            _ => WallprintError::store(format!("read '{}': {e}", full.display())),
        })
    }

    fn upload(&self, bytes: &[u8], path: &str, content_type: &str) -> WallprintResult<String> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WallprintError::store(format!("create '{}': {e}", parent.display()))
            })?;
        }
        std::fs::write(&full, bytes)
            .map_err(|e| WallprintError::store(format!("write '{}': {e}", full.display())))?;
        let abs = std::path::absolute(&full).unwrap_or(full);
        tracing::debug!(path, content_type, bytes = bytes.len(), "stored blob");
        Ok(format!("file://{}", abs.display()))
    }

    fn delete(&self, path: &str) -> DeleteOutcome {
        let full = match self.resolve(path) {
            Ok(p) => p,
            Err(e) => return DeleteOutcome::Failed(e.to_string()),
        };
        match std::fs::remove_file(&full) {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => DeleteOutcome::Missing,
            Err(e) => DeleteOutcome::Failed(format!("remove '{}': {e}", full.display())),
        }
    }
}

#[derive(Clone, Debug)]
struct StoredBlob {
    bytes: Vec<u8>,
    content_type: String,
}

#[derive(Debug, Default)]
struct MemoryBlobs {
    blobs: BTreeMap<String, StoredBlob>,
    failing_uploads: BTreeSet<String>,
    failing_deletes: BTreeSet<String>,
}

/// In-process blob store; URLs are `memory://<path>`.
///
/// Individual paths can be made to fail uploads or deletes to exercise error handling.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    inner: Mutex<MemoryBlobs>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> WallprintResult<std::sync::MutexGuard<'_, MemoryBlobs>> {
        self.inner
            .lock()
            .map_err(|_| WallprintError::store("memory blob store lock poisoned"))
    }

    /// Seed a blob without going through [`BlobStore::upload`].
    pub fn insert(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> WallprintResult<()> {
        self.lock()?.blobs.insert(
            path.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lock().is_ok_and(|g| g.blobs.contains_key(path))
    }

    pub fn content_type(&self, path: &str) -> Option<String> {
        let guard = self.lock().ok()?;
        guard.blobs.get(path).map(|b| b.content_type.clone())
    }

    /// Stored paths in sorted order.
    pub fn paths(&self) -> Vec<String> {
        self.lock()
            .map(|g| g.blobs.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn fail_uploads_to(&self, path: &str) -> WallprintResult<()> {
        self.lock()?.failing_uploads.insert(path.to_string());
        Ok(())
    }

    pub fn fail_deletes_of(&self, path: &str) -> WallprintResult<()> {
        self.lock()?.failing_deletes.insert(path.to_string());
        Ok(())
    }
}

impl BlobStore for MemoryBlobStore {
    fn download(&self, path: &str) -> WallprintResult<Vec<u8>> {
        self.lock()?
            .blobs
            .get(path)
            .map(|b| b.bytes.clone())
            .ok_or_else(|| WallprintError::SourceNotFound(path.to_string()))
    }

    fn upload(&self, bytes: &[u8], path: &str, content_type: &str) -> WallprintResult<String> {
        let mut guard = self.lock()?;
        if guard.failing_uploads.contains(path) {
            return Err(WallprintError::store(format!("upload to '{path}' refused")));
        }
        guard.blobs.insert(
            path.to_string(),
            StoredBlob {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("memory://{path}"))
    }

    fn delete(&self, path: &str) -> DeleteOutcome {
        let mut guard = match self.lock() {
            Ok(g) => g,
            Err(e) => return DeleteOutcome::Failed(e.to_string()),
        };
        if guard.failing_deletes.contains(path) {
            return DeleteOutcome::Failed(format!("delete of '{path}' refused"));
        }
        match guard.blobs.remove(path) {
            Some(_) => DeleteOutcome::Deleted,
            None => DeleteOutcome::Missing,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/blob.rs"]
mod tests;
