use axum::{extract::State, response::IntoResponse, Extension};

use crate::config::AppState;
use crate::models::auth_model::{
    CurrentUser, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
};
use crate::services::auth_service::AuthService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn register_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> impl IntoResponse {
    match AuthService::register_user(&state.db, payload.username, payload.email, payload.password)
        .await
    {
        Ok(user) => ResponseBuilder::created(
            "AUTH_REGISTER_SUCCESS",
            "User registered successfully",
            RegisterResponse {
                id: user.public_id,
                username: user.username,
                email: user.email,
                role: user.role,
            },
        ),
        Err((status, code, message)) => {
            ResponseBuilder::error::<RegisterResponse>(status, code, &message)
        }
    }
}

pub async fn login_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    match AuthService::login_user(&state.db, payload.login_id, payload.password).await {
        Ok((token, token_expires_at)) => ResponseBuilder::success(
            "AUTH_LOGIN_SUCCESS",
            "Login successful",
            LoginResponse {
                token,
                token_expires_at,
            },
        ),
        Err((status, code, message)) => {
            ResponseBuilder::error::<LoginResponse>(status, code, &message)
        }
    }
}

pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match AuthService::get_profile(&state.db, user.public_id).await {
        Ok(profile) => ResponseBuilder::success("PROFILE_FETCHED", "Success", profile),
        Err((status, code, message)) => {
            ResponseBuilder::error::<ProfileResponse>(status, code, &message)
        }
    }
}
