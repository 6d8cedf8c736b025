use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::openapi::OpenApi;

use crate::core::middleware;
use crate::features::categories::{routes as categories_routes, CategoryRegistry};
use crate::features::media::{routes as media_routes, MediaService};
use crate::modules::storage::AssetStore;

/// Shared services the routers are built from
pub struct AppServices {
    pub registry: Arc<CategoryRegistry>,
    pub media_service: Arc<MediaService>,
    pub assets: Arc<AssetStore>,
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Assemble the full application router with CORS, tracing and request ids
pub fn create_router(
    services: AppServices,
    cors_allowed_origins: &[String],
    max_upload_size: usize,
    openapi: OpenApi,
) -> Router {
    let docs = Router::new().route(
        "/api-docs/openapi.json",
        get(move || {
            let openapi = openapi.clone();
            async move { Json(openapi) }
        }),
    );

    Router::new()
        .merge(categories_routes::routes(services.registry))
        .merge(media_routes::routes(services.media_service, max_upload_size))
        .merge(media_routes::asset_routes(services.assets))
        .merge(docs)
        .route("/health", get(health_check))
        .layer(middleware::cors_layer(cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
