use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};

use crate::config::AppState;
use crate::models::{article_model::*, auth_model::CurrentUser};
use crate::services::article_service::ArticleService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_articles_handler(
    State(state): State<AppState>,
    viewer: Option<Extension<CurrentUser>>,
    Query(params): Query<ArticleFilterParams>,
) -> impl IntoResponse {
    let viewer = viewer.as_deref();
    match ArticleService::list_articles(&state.db, params, viewer).await {
        Ok(res) => ResponseBuilder::success("ARTICLES_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn get_article_handler(
    State(state): State<AppState>,
    viewer: Option<Extension<CurrentUser>>,
    Path(id_or_slug): Path<String>,
) -> impl IntoResponse {
    let viewer = viewer.as_deref();
    match ArticleService::get_article(&state.db, id_or_slug, viewer).await {
        Ok(res) => ResponseBuilder::success("ARTICLE_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn create_article_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateArticleRequest>,
) -> impl IntoResponse {
    if !user.role.can_author() {
        return ResponseBuilder::error::<()>(
            StatusCode::FORBIDDEN,
            "ACCESS_DENIED",
            "Only authors and editors can create articles",
        )
        .into_response();
    }

    match ArticleService::create_article(&state.db, &user, payload).await {
        Ok(res) => ResponseBuilder::created("ARTICLE_CREATED", "Article created", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn update_article_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<uuid::Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateArticleRequest>,
) -> impl IntoResponse {
    match ArticleService::update_article(&state.db, id, &user, payload).await {
        Ok(res) => ResponseBuilder::success("ARTICLE_UPDATED", "Article updated", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn delete_article_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    match ArticleService::delete_article(&state.db, id, &user).await {
        Ok(_) => ResponseBuilder::success::<()>("ARTICLE_DELETED", "Article deleted", ()).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
