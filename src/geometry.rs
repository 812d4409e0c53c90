//! Pure geometry: orientation, trim and crop planning, square fitting and annotation layout.
//!
//! Nothing here touches pixels, so all of it is testable without a drawing backend.

pub mod annotation;
pub mod crop;
pub mod fit;
pub mod orientation;
pub mod trim;
pub mod vector;
