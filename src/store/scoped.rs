//! Local temp-file buffers for blobs moving in and out of a pipeline.
//!
//! Both types own a `tempfile::NamedTempFile`, so the local copy is removed when the value
//! is dropped, whether the pipeline finished or bailed out with `?`.

use std::{
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
};

use anyhow::Context;

use crate::{
    assets::encode::content_type_for,
    foundation::error::{WallprintError, WallprintResult},
    store::{BlobStore, file_stem, split_path},
};

fn temp_for(storage_path: &str) -> WallprintResult<tempfile::NamedTempFile> {
    let (_, name) = split_path(storage_path);
    let file = tempfile::Builder::new()
        .prefix("wallprint-")
        .suffix(&format!("-{name}"))
        .tempfile()
        .context("create local temp file")?;
    Ok(file)
}

fn read_all(file: &mut tempfile::NamedTempFile) -> WallprintResult<Vec<u8>> {
    let f = file.as_file_mut();
    f.seek(SeekFrom::Start(0)).context("rewind local temp file")?;
    let mut bytes = Vec::new();
    f.read_to_end(&mut bytes).context("read local temp file")?;
    Ok(bytes)
}

/// A blob downloaded into a local temp file.
#[derive(Debug)]
pub struct DownloadFile {
    storage_path: String,
    local: tempfile::NamedTempFile,
}

impl DownloadFile {
    pub fn fetch(store: &dyn BlobStore, storage_path: &str) -> WallprintResult<Self> {
        let bytes = store.download(storage_path)?;
        let mut local = temp_for(storage_path)?;
        local
            .write_all(&bytes)
            .context("write downloaded blob to temp file")?;
        tracing::debug!(
            storage_path,
            local = %local.path().display(),
            bytes = bytes.len(),
            "downloaded blob"
        );
        Ok(Self {
            storage_path: storage_path.to_string(),
            local,
        })
    }

    pub fn storage_path(&self) -> &str {
        &self.storage_path
    }

    pub fn storage_dir(&self) -> &str {
        split_path(&self.storage_path).0
    }

    pub fn file_name(&self) -> &str {
        split_path(&self.storage_path).1
    }

    pub fn stem(&self) -> &str {
        file_stem(self.file_name())
    }

    pub fn local_path(&self) -> &Path {
        self.local.path()
    }

    pub fn read(&mut self) -> WallprintResult<Vec<u8>> {
        read_all(&mut self.local)
    }
}

/// An artifact staged locally, then uploaded to its storage path.
#[derive(Debug)]
pub struct UploadFile {
    storage_path: String,
    local: tempfile::NamedTempFile,
    url: Option<String>,
}

impl UploadFile {
    pub fn new(storage_path: impl Into<String>) -> WallprintResult<Self> {
        let storage_path = storage_path.into();
        let local = temp_for(&storage_path)?;
        Ok(Self {
            storage_path,
            local,
            url: None,
        })
    }

    /// Stage `bytes`, replacing anything staged before.
    pub fn write(&mut self, bytes: &[u8]) -> WallprintResult<()> {
        let f = self.local.as_file_mut();
        f.set_len(0).context("truncate local temp file")?;
        f.seek(SeekFrom::Start(0)).context("rewind local temp file")?;
        f.write_all(bytes).context("write local temp file")?;
        f.flush().context("flush local temp file")?;
        Ok(())
    }

    pub fn read(&mut self) -> WallprintResult<Vec<u8>> {
        read_all(&mut self.local)
    }

    /// Upload the staged bytes with a content type inferred from the storage path.
    pub fn upload(&mut self, store: &dyn BlobStore) -> WallprintResult<String> {
        self.upload_as(store, content_type_for(&self.storage_path))
    }

    /// Upload the staged bytes labelled `content_type`, whatever the path's extension says.
    pub fn upload_as(
        &mut self,
        store: &dyn BlobStore,
        content_type: &'static str,
    ) -> WallprintResult<String> {
        let bytes = self.read()?;
        if bytes.is_empty() {
            return Err(WallprintError::store(format!(
                "nothing staged for '{}'",
                self.storage_path
            )));
        }
        let url = store.upload(&bytes, &self.storage_path, content_type)?;
        tracing::info!(
            storage_path = %self.storage_path,
            content_type,
            url = %url,
            "uploaded artifact"
        );
        self.url = Some(url.clone());
        Ok(url)
    }

    pub fn storage_path(&self) -> &str {
        &self.storage_path
    }

    pub fn local_path(&self) -> &Path {
        self.local.path()
    }

    /// URL returned by the last successful [`UploadFile::upload`].
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/scoped.rs"]
mod tests;
