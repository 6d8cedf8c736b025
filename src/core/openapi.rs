use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::media::{dtos as media_dtos, handlers as media_handlers};
use crate::shared::types::{ApiResponse, ResponseStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        // Media
        media_handlers::list_media,
        media_handlers::upload_video,
        // Assets
        media_handlers::get_video,
        media_handlers::get_thumbnail,
    ),
    components(
        schemas(
            ResponseStatus,
            categories_dtos::CategoryListDto,
            media_dtos::UploadMediaDto,
            media_dtos::UploadMediaResponseDto,
            media_dtos::MediaResponseDto,
            media_dtos::MediaListDto,
            ApiResponse<categories_dtos::CategoryListDto>,
            ApiResponse<media_dtos::MediaListDto>,
            ApiResponse<media_dtos::UploadMediaResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Fixed media categories"),
        (name = "media", description = "Media upload and catalog listing"),
        (name = "assets", description = "Stored video and thumbnail files"),
    ),
    info(
        title = "Media Catalog API",
        version = "0.1.0",
        description = "Upload videos with thumbnails and browse the media catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct ApiInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for ApiInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
