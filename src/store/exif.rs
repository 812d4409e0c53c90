use crate::{assets::decode::exif_orientation, store::OrientationReader};

/// Reads the orientation tag through the `image` crate's decoder metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageExifReader;

impl OrientationReader for ImageExifReader {
    fn read_orientation(&self, bytes: &[u8]) -> Option<u16> {
        exif_orientation(bytes)
    }
}

/// Always reports the same orientation; handy for tests and for callers that already know it.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedOrientation(pub Option<u16>);

impl OrientationReader for FixedOrientation {
    fn read_orientation(&self, _bytes: &[u8]) -> Option<u16> {
        self.0
    }
}
