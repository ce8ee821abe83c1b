use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension};

use crate::config::AppState;
use crate::models::auth_model::CurrentUser;
use crate::models::category_model::CreateCategoryRequest;
use crate::services::category_service::CategoryService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_categories_handler(State(state): State<AppState>) -> impl IntoResponse {
    match CategoryService::list_categories(&state.db).await {
        Ok(res) => ResponseBuilder::success("CATEGORIES_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn create_category_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> impl IntoResponse {
    if !user.role.can_edit_any() {
        return ResponseBuilder::error::<()>(
            StatusCode::FORBIDDEN,
            "ACCESS_DENIED",
            "Only editors can create categories",
        )
        .into_response();
    }

    match CategoryService::create_category(&state.db, payload.name).await {
        Ok(res) => {
            ResponseBuilder::created("CATEGORY_CREATED", "Category created", res).into_response()
        }
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
