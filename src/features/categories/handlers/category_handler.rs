use std::sync::Arc;

use axum::{extract::State, Json};

use crate::features::categories::dtos::CategoryListDto;
use crate::features::categories::registry::CategoryRegistry;
use crate::shared::types::ApiResponse;

/// List all media categories
///
/// Returns the fixed registry in display order.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<CategoryListDto>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(registry): State<Arc<CategoryRegistry>>,
) -> Json<ApiResponse<CategoryListDto>> {
    Json(ApiResponse::success(CategoryListDto {
        categories: registry.list().to_vec(),
    }))
}
