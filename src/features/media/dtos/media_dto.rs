use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload media request DTO for OpenAPI documentation
/// Note: This struct is for API docs only.
/// The actual handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaDto {
    /// The video file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// The thumbnail image
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub thumbnail: String,
    #[schema(example = "Round 1")]
    pub title: String,
    /// One of the registered categories
    #[schema(example = "Rap Battles")]
    pub category: String,
}

/// A file part read from an upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client
    pub filename: String,
    pub data: Bytes,
}

/// Raw upload form as read from the request; any field may be absent
#[derive(Debug, Default)]
pub struct UploadMediaForm {
    pub file: Option<UploadedFile>,
    pub thumbnail: Option<UploadedFile>,
    pub title: Option<String>,
    pub category: Option<String>,
}

/// Response DTO for a successful upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadMediaResponseDto {
    #[schema(example = "File and thumbnail uploaded successfully")]
    pub message: String,
    /// Server-local path of the stored video
    pub file_path: String,
    /// Server-local path of the stored thumbnail
    pub thumbnail_path: String,
}

/// Response DTO for a catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaResponseDto {
    pub id: i64,
    pub title: String,
    /// Public URL of the video
    #[schema(example = "http://localhost:5000/videos/a.mp4")]
    pub file_path: String,
    /// Public URL of the thumbnail
    #[schema(example = "http://localhost:5000/thumbnails/a.jpg")]
    pub thumbnail_path: String,
    pub category: String,
}

/// Response DTO for the media listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MediaListDto {
    pub media: Vec<MediaResponseDto>,
}
