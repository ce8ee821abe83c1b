use crate::config::AppState;
use crate::handlers::auth_handler::*;
use crate::middleware::auth_middleware::require_auth_middleware;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn auth_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register_user_handler))
        .route("/login", post(login_user_handler));

    let protected = Router::new()
        .route("/profile", get(profile_handler))
        .layer(middleware::from_fn_with_state(state, require_auth_middleware));

    public.merge(protected)
}
