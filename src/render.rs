//! Drawing on top of `vello_cpu`: the trimmed-base compositor, the thumbnail fitter and the
//! primitive renderer. Geometry is decided in [`crate::geometry`]; this layer only paints.

pub mod compose;
pub mod cpu;
pub mod primitives;
pub mod text;
pub mod thumbnail;
