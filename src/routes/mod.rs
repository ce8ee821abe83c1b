use crate::config::AppState;
use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod article_route;
pub mod auth_route;
pub mod category_route;
pub mod favorite_route;
pub mod media_route;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/auth", auth_route::auth_routes(state.clone()))
        .nest(
            "/api/articles",
            article_route::article_routes(state.clone()),
        )
        .nest(
            "/api/categories",
            category_route::category_routes(state.clone()),
        )
        .nest("/api/media", media_route::media_routes(state.clone()))
        .nest(
            "/api/favorites",
            favorite_route::favorite_routes(state.clone()),
        )
        .route(
            "/api/health",
            axum::routing::get(crate::handlers::health_check_handler),
        )
        .layer(cors)
}
