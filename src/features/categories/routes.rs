use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::registry::CategoryRegistry;

/// Create routes for the categories feature
pub fn routes(registry: Arc<CategoryRegistry>) -> Router {
    Router::new()
        .route("/categories", get(handlers::list_categories))
        .with_state(registry)
}
