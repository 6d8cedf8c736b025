pub mod categories;
pub mod media;
