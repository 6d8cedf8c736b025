pub mod dtos;
pub mod handlers;
pub mod registry;
pub mod routes;

pub use registry::CategoryRegistry;
