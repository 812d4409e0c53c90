/// Convenience result type used across wallprint.
pub type WallprintResult<T> = Result<T, WallprintError>;

/// Top-level error taxonomy used by the transform, render and pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum WallprintError {
    /// Trim fractions leave no pixels (or are out of range).
    #[error("invalid trim geometry: {0}")]
    InvalidTrimGeometry(String),

    /// An image with a zero (or unrepresentable) dimension reached a transform.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions {
        /// Offending width in pixels.
        width: u32,
        /// Offending height in pixels.
        height: u32,
    },

    /// A label-carrying primitive names a placement outside the known set.
    #[error("invalid placement '{0}'")]
    InvalidPlacement(String),

    /// A primitive names a size class outside the known set.
    #[error("unknown primitive size type '{0}'")]
    UnknownPrimitiveSizeType(String),

    /// The blob store has nothing at the requested path.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    /// Encoded image bytes could not be decoded.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// EXIF orientation code the resolver does not rotate for.
    ///
    /// Only produced by the strict resolver; pipelines log it and fall back to 0°.
    #[error("unsupported exif orientation: {0:?}")]
    OrientationUnsupported(Option<u16>),

    /// Invalid user-provided configuration or record data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Drawing backend limits or missing render resources.
    #[error("render error: {0}")]
    Render(String),

    /// Blob or record store failure.
    #[error("store error: {0}")]
    Store(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WallprintError {
    /// Build a [`WallprintError::InvalidTrimGeometry`] value.
    pub fn trim(msg: impl Into<String>) -> Self {
        Self::InvalidTrimGeometry(msg.into())
    }

    /// Build a [`WallprintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WallprintError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WallprintError::Store`] value.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Build a [`WallprintError::DecodeFailure`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
