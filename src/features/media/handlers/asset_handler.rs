use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::core::error::AppError;
use crate::modules::storage::{AssetStore, Bucket};

/// Fetch a stored video
#[utoipa::path(
    get,
    path = "/videos/{filename}",
    tag = "assets",
    params(
        ("filename" = String, Path, description = "Stored video file name")
    ),
    responses(
        (status = 200, description = "Raw video bytes"),
        (status = 404, description = "No such file")
    )
)]
pub async fn get_video(
    State(assets): State<Arc<AssetStore>>,
    Path(filename): Path<String>,
) -> Response {
    serve_asset(&assets, Bucket::Video, &filename).await
}

/// Fetch a stored thumbnail
#[utoipa::path(
    get,
    path = "/thumbnails/{filename}",
    tag = "assets",
    params(
        ("filename" = String, Path, description = "Stored thumbnail file name")
    ),
    responses(
        (status = 200, description = "Raw thumbnail bytes"),
        (status = 404, description = "No such file")
    )
)]
pub async fn get_thumbnail(
    State(assets): State<Arc<AssetStore>>,
    Path(filename): Path<String>,
) -> Response {
    serve_asset(&assets, Bucket::Thumbnail, &filename).await
}

/// Stream a stored file. Failures carry no envelope, only the status.
async fn serve_asset(assets: &AssetStore, bucket: Bucket, filename: &str) -> Response {
    let asset = match assets.resolve(bucket, filename).await {
        Ok(asset) => asset,
        Err(AppError::NotFound(_)) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(
                "Failed to open {} asset '{}': {}",
                bucket.as_str(),
                filename,
                e
            );
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let stream = ReaderStream::new(asset.file);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, asset.content_type.to_string()),
            (header::CONTENT_LENGTH, asset.size.to_string()),
        ],
        Body::from_stream(stream),
    )
        .into_response()
}
