pub mod catalog_store;
pub mod media_service;

pub use catalog_store::CatalogStore;
pub use media_service::MediaService;
