use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};

use crate::config::AppState;
use crate::models::auth_model::CurrentUser;
use crate::models::favorite_model::AddFavoriteRequest;
use crate::services::favorite_service::FavoriteService;
use crate::utils::api_response::ResponseBuilder;

pub async fn list_user_favorites_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match FavoriteService::list_user_favorites(&state.db, &user).await {
        Ok(res) => ResponseBuilder::success("FAVORITES_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn add_favorite_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Option<Json<AddFavoriteRequest>>,
) -> impl IntoResponse {
    let article = payload.and_then(|Json(p)| p.data.article);

    match FavoriteService::add(&state.db, &user, article).await {
        Ok(res) => ResponseBuilder::success("FAVORITE_ADDED", "Article favorited", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn remove_favorite_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    match FavoriteService::remove(&state.db, &user, id).await {
        Ok(res) => ResponseBuilder::success("FAVORITE_REMOVED", "Favorite removed", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
