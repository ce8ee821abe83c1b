use crate::models::article_model::{ArticleResponse, ListMeta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of POST /api/favorites: `{"data": {"article": "<uuid>"}}`.
/// Both layers are optional so a missing id surfaces as a 400, not a
/// deserialization failure.
#[derive(Deserialize, Default)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub data: AddFavoriteData,
}

#[derive(Deserialize, Default)]
pub struct AddFavoriteData {
    pub article: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatusResponse {
    pub is_favorite: bool,
    pub favorite_id: Uuid,
}

#[derive(Serialize)]
pub struct FavoriteListResponse {
    pub data: Vec<ArticleResponse>,
    pub meta: ListMeta,
}
