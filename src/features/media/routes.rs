use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::media::handlers::{get_thumbnail, get_video, list_media, upload_video};
use crate::features::media::services::MediaService;
use crate::modules::storage::AssetStore;
use crate::shared::constants::{MULTIPART_OVERHEAD, THUMBNAIL_ROUTE, VIDEO_ROUTE};

/// Create routes for listing and uploading media
pub fn routes(service: Arc<MediaService>, max_upload_size: usize) -> Router {
    Router::new()
        .route("/media", get(list_media))
        .route(
            "/upload_video",
            post(upload_video)
                .layer(DefaultBodyLimit::max(max_upload_size + MULTIPART_OVERHEAD)),
        )
        .with_state(service)
}

/// Create routes serving stored files
pub fn asset_routes(assets: Arc<AssetStore>) -> Router {
    Router::new()
        .route(&format!("{}/{{filename}}", VIDEO_ROUTE), get(get_video))
        .route(&format!("{}/{{filename}}", THUMBNAIL_ROUTE), get(get_thumbnail))
        .with_state(assets)
}
