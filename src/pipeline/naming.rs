//! Derived artifact paths. These names are read by existing clients and must not drift.

use crate::{
    config::ProcessingConfig,
    store::{file_stem, join_path, split_path},
};

/// `<dir>/trimmed_<originalFileName>`.
pub fn trimmed_path(cfg: &ProcessingConfig, original_path: &str) -> String {
    let (dir, name) = split_path(original_path);
    join_path(dir, &format!("{}{name}", cfg.trimmed_prefix))
}

/// `<dir>/thumb_<basename-without-ext>.png`.
pub fn base_thumb_path(cfg: &ProcessingConfig, original_path: &str) -> String {
    let (dir, name) = split_path(original_path);
    join_path(dir, &format!("{}{}.png", cfg.thumb_prefix, file_stem(name)))
}

/// The trimmed image and thumbnail recorded for a base picture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseArtifacts {
    pub trimmed: String,
    pub thumbnail: String,
}

impl BaseArtifacts {
    /// Reverse the naming rule from the stored `picturePath`.
    ///
    /// `None` when the file name does not carry the trimmed prefix.
    pub fn from_picture_path(cfg: &ProcessingConfig, picture_path: &str) -> Option<Self> {
        let (dir, name) = split_path(picture_path);
        let original = name.strip_prefix(cfg.trimmed_prefix.as_str())?;
        if original.is_empty() {
            return None;
        }
        Some(Self {
            trimmed: picture_path.to_string(),
            thumbnail: base_thumb_path(cfg, &join_path(dir, original)),
        })
    }
}

/// `problemImages/completed_<docID>.jpg`.
pub fn completed_path(cfg: &ProcessingConfig, problem_id: &str) -> String {
    join_path(
        &cfg.problem_image_dir,
        &format!("{}{problem_id}.jpg", cfg.completed_prefix),
    )
}

/// `problemImages/thumb_<docID>.jpg`.
pub fn problem_thumb_path(cfg: &ProcessingConfig, problem_id: &str) -> String {
    join_path(
        &cfg.problem_image_dir,
        &format!("{}{problem_id}.jpg", cfg.thumb_prefix),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/naming.rs"]
mod tests;
