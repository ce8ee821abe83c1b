pub mod article_handler;
pub mod auth_handler;
pub mod category_handler;
pub mod favorite_handler;
pub mod media_handler;

use crate::utils::api_response::ResponseBuilder;
use axum::response::IntoResponse;
use chrono::Utc;

pub async fn health_check_handler() -> impl IntoResponse {
    ResponseBuilder::success(
        "HEALTH_CHECK_SUCCESS",
        "Server is healthy",
        serde_json::json!({
            "status": "up",
            "server_time": Utc::now().to_rfc3339(),
        }),
    )
}
