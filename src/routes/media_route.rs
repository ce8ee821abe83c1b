use crate::config::AppState;
use crate::handlers::media_handler::*;
use crate::middleware::auth_middleware::require_auth_middleware;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn media_routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/", get(list_media_handler));

    let protected = Router::new()
        .route("/", post(register_media_handler))
        .layer(middleware::from_fn_with_state(state, require_auth_middleware));

    public.merge(protected)
}
