pub mod primitive;
pub mod records;
