//! Storage module for uploaded media
//!
//! Provides the local asset store backing the video and thumbnail buckets.

mod local_store;

pub use local_store::{fit_filename, sanitize_filename, AssetStore, Bucket};
