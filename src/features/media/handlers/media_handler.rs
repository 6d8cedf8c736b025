use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::core::extractor::{multipart_error, AppMultipart};
use crate::features::media::dtos::{
    MediaListDto, UploadMediaDto, UploadMediaForm, UploadMediaResponseDto, UploadedFile,
};
use crate::features::media::services::MediaService;
use crate::shared::types::ApiResponse;

/// List all media
///
/// Returns every catalog entry in upload order, with fetchable URLs for the
/// video and thumbnail.
#[utoipa::path(
    get,
    path = "/media",
    tag = "media",
    responses(
        (status = 200, description = "All media", body = ApiResponse<MediaListDto>),
        (status = 500, description = "Catalog could not be read")
    )
)]
pub async fn list_media(
    State(service): State<Arc<MediaService>>,
) -> Result<Json<ApiResponse<MediaListDto>>, AppError> {
    let media = service.list_media().await?;
    Ok(Json(ApiResponse::success(MediaListDto { media })))
}

/// Upload a video with its thumbnail
///
/// Accepts multipart/form-data with:
/// - `file`: The video file (required)
/// - `thumbnail`: The thumbnail image (required)
/// - `title`: Non-empty title (required)
/// - `category`: One of the registered categories (required)
#[utoipa::path(
    post,
    path = "/upload_video",
    tag = "media",
    request_body(
        content = UploadMediaDto,
        content_type = "multipart/form-data",
        description = "Video, thumbnail, title and category",
    ),
    responses(
        (status = 200, description = "Media uploaded", body = ApiResponse<UploadMediaResponseDto>),
        (status = 400, description = "Missing field or invalid category"),
        (status = 413, description = "Upload too large"),
        (status = 500, description = "Files or metadata could not be stored")
    )
)]
pub async fn upload_video(
    State(service): State<Arc<MediaService>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<ApiResponse<UploadMediaResponseDto>>, AppError> {
    let mut form = UploadMediaForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart data"))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" | "thumbnail" => {
                // A part without a filename is not a file upload
                let Some(filename) = field.file_name().map(|s| s.to_string()) else {
                    debug!("Ignoring non-file part for field: {}", field_name);
                    continue;
                };

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "file data"))?;

                let uploaded = UploadedFile { filename, data };
                if field_name == "file" {
                    form.file = Some(uploaded);
                } else {
                    form.thumbnail = Some(uploaded);
                }
            }
            "title" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "title field"))?;
                form.title = Some(text);
            }
            "category" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "category field"))?;
                form.category = Some(text);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let upload = service.validate(form)?;
    let response = service.upload(upload).await?;

    Ok(Json(ApiResponse::success(response)))
}
