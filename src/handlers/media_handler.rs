use axum::{extract::State, response::IntoResponse, Extension};

use crate::config::AppState;
use crate::models::auth_model::CurrentUser;
use crate::models::media_model::CreateMediaRequest;
use crate::services::media_service::MediaService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_media_handler(State(state): State<AppState>) -> impl IntoResponse {
    match MediaService::list_media(&state.db).await {
        Ok(res) => ResponseBuilder::success("MEDIA_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn register_media_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateMediaRequest>,
) -> impl IntoResponse {
    match MediaService::register_media(&state.db, user.id, payload).await {
        Ok(res) => ResponseBuilder::created("MEDIA_REGISTERED", "Media registered", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
