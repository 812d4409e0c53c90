use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;

use crate::{
    foundation::error::{WallprintError, WallprintResult},
    store::{RecordStore, merge_patch},
};

fn segment(s: &str) -> WallprintResult<&str> {
    if s.is_empty() || s == "." || s == ".." || s.contains(['/', '\\']) {
        return Err(WallprintError::store(format!(
            "'{s}' is not a valid collection or document id"
        )));
    }
    Ok(s)
}

/// Documents as JSON files: `<root>/<collection>/<id>.json`, children under
/// `<root>/<collection>/<id>/<sub>/*.json` (listed in file-name order).
#[derive(Clone, Debug)]
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doc_path(&self, collection: &str, id: &str) -> WallprintResult<PathBuf> {
        Ok(self
            .root
            .join(segment(collection)?)
            .join(format!("{}.json", segment(id)?)))
    }

    fn children_dir(&self, collection: &str, id: &str, sub: &str) -> WallprintResult<PathBuf> {
        Ok(self
            .root
            .join(segment(collection)?)
            .join(segment(id)?)
            .join(segment(sub)?))
    }

    /// Create or replace a document.
    pub fn put(&self, collection: &str, id: &str, doc: &serde_json::Value) -> WallprintResult<()> {
        write_json(&self.doc_path(collection, id)?, doc)
    }

    pub fn put_child(
        &self,
        collection: &str,
        id: &str,
        sub: &str,
        child_id: &str,
        doc: &serde_json::Value,
    ) -> WallprintResult<()> {
        let path = self
            .children_dir(collection, id, sub)?
            .join(format!("{}.json", segment(child_id)?));
        write_json(&path, doc)
    }
}

fn write_json(path: &Path, doc: &serde_json::Value) -> WallprintResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create record dir '{}'", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(doc).context("serialize record")?;
    std::fs::write(path, text).with_context(|| format!("write record '{}'", path.display()))?;
    Ok(())
}

fn read_json(path: &Path) -> WallprintResult<Option<serde_json::Value>> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(WallprintError::store(format!(
                "read record '{}': {e}",
                path.display()
            )));
        }
    };
    let value = serde_json::from_str(&text)
        .map_err(|e| WallprintError::store(format!("parse record '{}': {e}", path.display())))?;
    Ok(Some(value))
}

impl RecordStore for FsRecordStore {
    fn get(&self, collection: &str, id: &str) -> WallprintResult<Option<serde_json::Value>> {
        read_json(&self.doc_path(collection, id)?)
    }

    fn update(&self, collection: &str, id: &str, patch: &serde_json::Value) -> WallprintResult<()> {
        let path = self.doc_path(collection, id)?;
        let mut doc = read_json(&path)?.ok_or_else(|| {
            WallprintError::store(format!("no document {collection}/{id} to update"))
        })?;
        merge_patch(&mut doc, patch)?;
        write_json(&path, &doc)
    }

    fn list_children(
        &self,
        collection: &str,
        id: &str,
        sub: &str,
    ) -> WallprintResult<Vec<serde_json::Value>> {
        let dir = self.children_dir(collection, id, sub)?;
        let entries = match std::fs::read_dir(&dir) {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(WallprintError::store(format!(
                    "list '{}': {e}",
                    dir.display()
                )));
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| WallprintError::store(format!("list '{}': {e}", dir.display())))?
                .path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let mut out = Vec::with_capacity(files.len());
        for path in files {
            if let Some(doc) = read_json(&path)? {
                out.push(doc);
            }
        }
        Ok(out)
    }
}

#[derive(Debug, Default)]
struct MemoryRecords {
    docs: BTreeMap<(String, String), serde_json::Value>,
    children: BTreeMap<(String, String, String), Vec<serde_json::Value>>,
}

/// In-process record store; children keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: Mutex<MemoryRecords>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> WallprintResult<std::sync::MutexGuard<'_, MemoryRecords>> {
        self.inner
            .lock()
            .map_err(|_| WallprintError::store("memory record store lock poisoned"))
    }

    pub fn insert(&self, collection: &str, id: &str, doc: serde_json::Value) -> WallprintResult<()> {
        self.lock()?
            .docs
            .insert((collection.to_string(), id.to_string()), doc);
        Ok(())
    }

    pub fn push_child(
        &self,
        collection: &str,
        id: &str,
        sub: &str,
        doc: serde_json::Value,
    ) -> WallprintResult<()> {
        self.lock()?
            .children
            .entry((collection.to_string(), id.to_string(), sub.to_string()))
            .or_default()
            .push(doc);
        Ok(())
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, collection: &str, id: &str) -> WallprintResult<Option<serde_json::Value>> {
        Ok(self
            .lock()?
            .docs
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    fn update(&self, collection: &str, id: &str, patch: &serde_json::Value) -> WallprintResult<()> {
        let mut guard = self.lock()?;
        let doc = guard
            .docs
            .get_mut(&(collection.to_string(), id.to_string()))
            .ok_or_else(|| {
                WallprintError::store(format!("no document {collection}/{id} to update"))
            })?;
        merge_patch(doc, patch)
    }

    fn list_children(
        &self,
        collection: &str,
        id: &str,
        sub: &str,
    ) -> WallprintResult<Vec<serde_json::Value>> {
        Ok(self
            .lock()?
            .children
            .get(&(collection.to_string(), id.to_string(), sub.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/record.rs"]
mod tests;
