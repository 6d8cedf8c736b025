pub mod media;

pub use media::{MediaRecord, NewMediaRecord};
