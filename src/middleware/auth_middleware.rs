use crate::config::AppState;
use crate::entities::user;
use crate::models::auth_model::CurrentUser;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::jwt_utils::JwtUtils;
use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Gate for routes that need an authenticated viewer. Validates the bearer
/// token, loads the user row and inserts a `CurrentUser` extension.
pub async fn require_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> std::result::Result<Response, StatusCode> {
    let token = match bearer_token(&req) {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };

    let token_data = match JwtUtils::validate_jwt(token) {
        Ok(data) => data,
        Err(e) => {
            let (code, message) = match e.kind() {
                ErrorKind::ExpiredSignature => ("TOKEN_EXPIRED", "Token has expired"),
                ErrorKind::InvalidToken => ("TOKEN_INVALID", "Token is invalid"),
                ErrorKind::InvalidSignature => ("TOKEN_BAD_SIGNATURE", "Invalid token signature"),
                _ => ("AUTH_FAILED", "Authentication failed"),
            };

            return Ok(
                ResponseBuilder::error::<()>(StatusCode::UNAUTHORIZED, code, message)
                    .into_response(),
            );
        }
    };

    let current_user = match fetch_current_user(&state.db, token_data.claims.sub).await {
        Some(u) => u,
        None => {
            return Ok(ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "USER_NOT_FOUND",
                "User no longer exists",
            )
            .into_response());
        }
    };

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Best-effort viewer resolution for public read routes. A missing or
/// invalid token leaves the request anonymous; it never rejects, so article
/// browsing keeps working without credentials.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> std::result::Result<Response, StatusCode> {
    if let Ok(token) = bearer_token(&req) {
        if let Ok(token_data) = JwtUtils::validate_jwt(token) {
            if let Some(current_user) = fetch_current_user(&state.db, token_data.claims.sub).await {
                req.extensions_mut().insert(current_user);
            }
        }
    }

    Ok(next.run(req).await)
}

fn bearer_token<'a>(req: &'a Request<Body>) -> Result<&'a str, Response> {
    let auth_header = match req.headers().get(header::AUTHORIZATION) {
        Some(header) => header,
        None => {
            return Err(ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "AUTH_MISSING",
                "Authorization header is missing",
            )
            .into_response());
        }
    };

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(_) => {
            return Err(ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "AUTH_INVALID_FORMAT",
                "Invalid Authorization header format",
            )
            .into_response());
        }
    };

    if !auth_str.starts_with("Bearer ") {
        return Err(ResponseBuilder::error::<()>(
            StatusCode::UNAUTHORIZED,
            "AUTH_INVALID_SCHEME",
            "Invalid token format. Missing 'Bearer ' prefix",
        )
        .into_response());
    }

    Ok(&auth_str[7..])
}

async fn fetch_current_user(db: &DatabaseConnection, public_id: uuid::Uuid) -> Option<CurrentUser> {
    let user = user::Entity::find()
        .filter(user::Column::PublicId.eq(public_id))
        .one(db)
        .await
        .ok()??;

    Some(CurrentUser {
        id: user.id,
        public_id: user.public_id,
        username: user.username,
        role: user.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::article;
    use crate::routes;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(db: sea_orm::DatabaseConnection) -> axum::Router {
        let state = AppState { db: Arc::new(db) };
        routes::create_routes(state.clone()).with_state(state)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn favorites_reject_anonymous_requests() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = app_with(db);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/favorites/user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "AUTH_MISSING");
    }

    #[tokio::test]
    async fn garbage_bearer_token_is_rejected() {
        // Token validation reads the runtime config.
        std::env::set_var("DATABASE_URL", "postgres://localhost/newsdesk_test");
        std::env::set_var("JWT_SECRET", "test-secret");

        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = app_with(db);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/favorites/user")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn article_reads_stay_public_without_a_token() {
        let count_row = BTreeMap::from([("num_items", sea_orm::Value::from(0i64))]);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row]])
            .append_query_results(vec![Vec::<article::Model>::new()])
            .into_connection();
        let app = app_with(db);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/articles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert!(json["data"]["data"].as_array().unwrap().is_empty());
    }
}
