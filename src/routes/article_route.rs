use crate::config::AppState;
use crate::handlers::article_handler::*;
use crate::middleware::auth_middleware::{optional_auth_middleware, require_auth_middleware};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

pub fn article_routes(state: AppState) -> Router<AppState> {
    // Reads resolve the viewer when a token is present but stay public;
    // writes are gated.
    let reads = Router::new()
        .route("/", get(list_articles_handler))
        .route("/{id_or_slug}", get(get_article_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ));

    let writes = Router::new()
        .route("/", post(create_article_handler))
        .route("/{id_or_slug}", put(update_article_handler))
        .route("/{id_or_slug}", delete(delete_article_handler))
        .layer(middleware::from_fn_with_state(state, require_auth_middleware));

    reads.merge(writes)
}
