use crate::{
    foundation::error::{WallprintError, WallprintResult},
    geometry::orientation::RotationAngle,
    geometry::trim::TrimSpec,
};

/// Collection holding uploaded wall photos.
pub const BASE_PICTURES: &str = "basePictures";
/// Collection holding problems (routes) drawn on a base picture.
pub const PROBLEMS: &str = "problems";
/// Sub-collection of a problem holding its primitives.
pub const PRIMITIVES: &str = "primitives";

/// A `basePictures/{id}` document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasePictureRecord {
    /// Upload to process; emptied once processed.
    #[serde(default)]
    pub original_path: String,
    #[serde(default)]
    pub rotation: RotationAngle,
    #[serde(default)]
    pub trim_left: f64,
    #[serde(default)]
    pub trim_right: f64,
    #[serde(default)]
    pub trim_top: f64,
    #[serde(default)]
    pub trim_bottom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_path: Option<String>,
    #[serde(rename = "pictureURL", default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(rename = "thumbnailURL", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl BasePictureRecord {
    pub fn trim(&self) -> TrimSpec {
        TrimSpec::new(self.trim_left, self.trim_right, self.trim_top, self.trim_bottom)
    }

    pub fn from_json(value: &serde_json::Value) -> WallprintResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| WallprintError::validation(format!("base picture record: {e}")))
    }
}

/// Fields written back after a base picture has been processed.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasePictureUpdate {
    pub original_path: String,
    pub picture_path: String,
    #[serde(rename = "pictureURL")]
    pub picture_url: String,
    #[serde(rename = "thumbnailURL")]
    pub thumbnail_url: String,
}

/// A `problems/{id}` document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    #[serde(default)]
    pub base_picture_path: String,
    #[serde(default)]
    pub trim_left: f64,
    #[serde(default)]
    pub trim_right: f64,
    #[serde(default)]
    pub trim_top: f64,
    #[serde(default)]
    pub trim_bottom: f64,
    #[serde(default)]
    pub image_required: bool,
    #[serde(
        rename = "completedImageURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_image_url: Option<String>,
    #[serde(
        rename = "completedImageThumbURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_image_thumb_url: Option<String>,
}

impl ProblemRecord {
    pub fn trim(&self) -> TrimSpec {
        TrimSpec::new(self.trim_left, self.trim_right, self.trim_top, self.trim_bottom)
    }

    pub fn from_json(value: &serde_json::Value) -> WallprintResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| WallprintError::validation(format!("problem record: {e}")))
    }
}

/// Fields written back after a problem image has been composited.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProblemUpdate {
    #[serde(rename = "imageRequired")]
    pub image_required: bool,
    #[serde(rename = "completedImageURL")]
    pub completed_image_url: String,
    #[serde(rename = "completedImageThumbURL")]
    pub completed_image_thumb_url: String,
}

/// Serialize an update struct into the JSON object patch the record store merges.
pub fn to_patch<T: serde::Serialize>(update: &T) -> WallprintResult<serde_json::Value> {
    serde_json::to_value(update)
        .map_err(|e| WallprintError::validation(format!("serialize record update: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/model/records.rs"]
mod tests;
