//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for the storage backends used by the features.

pub mod storage;
