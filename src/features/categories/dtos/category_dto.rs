use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response DTO for the category listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryListDto {
    #[schema(example = json!(["Rap Battles", "Music"]))]
    pub categories: Vec<String>,
}
