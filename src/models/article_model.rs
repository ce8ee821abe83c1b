use crate::models::category_model::CategoryResponse;
use crate::models::media_model::MediaResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    #[validate(length(min = 3, message = "Title is required and must be at least 3 chars"))]
    pub title: String,

    pub slug: Option<String>,
    pub excerpt: Option<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    /// Category public id.
    pub category: Option<Uuid>,
    /// Media public id used as cover image.
    pub cover_image: Option<Uuid>,

    #[serde(default)]
    pub featured: bool,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<Uuid>,
    pub cover_image: Option<Uuid>,
    pub featured: Option<bool>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ArticleAuthorResponse {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<CategoryResponse>,
    pub cover_image: Option<MediaResponse>,
    pub author: Option<ArticleAuthorResponse>,
    pub views: i64,
    pub reading_time: i32,
    pub featured: bool,
    /// Always present so consumers never need a null check; false for
    /// anonymous viewers.
    pub is_favorite: bool,
    pub favorite_id: Option<Uuid>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub page_count: u64,
    pub total: u64,
}

#[derive(Serialize)]
pub struct ListMeta {
    pub pagination: PaginationMeta,
}

#[derive(Serialize)]
pub struct ArticleListResponse {
    pub data: Vec<ArticleResponse>,
    pub meta: ListMeta,
}

#[derive(Deserialize)]
pub struct ArticleFilterParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Category slug.
    pub category: Option<String>,
    /// Author public id, the scope an author dashboard lists by.
    pub author: Option<Uuid>,
    pub featured: Option<bool>,
    /// Exact slug match, the lookup the web client uses for article pages.
    pub slug: Option<String>,
    pub search: Option<String>,
}
