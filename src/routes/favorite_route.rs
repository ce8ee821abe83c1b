use crate::config::AppState;
use crate::handlers::favorite_handler::*;
use crate::middleware::auth_middleware::require_auth_middleware;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

/// The whole favorites surface requires an authenticated viewer.
pub fn favorite_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user", get(list_user_favorites_handler))
        .route("/", post(add_favorite_handler))
        .route("/{id}", delete(remove_favorite_handler))
        .layer(middleware::from_fn_with_state(state, require_auth_middleware))
}
