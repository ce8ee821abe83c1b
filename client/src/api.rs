use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "api error ({}): {}", status, self.message),
            None => write!(f, "api error: {}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// `{status, code, message, data}` envelope every newsdesk endpoint uses.
#[derive(Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    status: String,
    #[allow(dead_code)]
    code: String,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorite: bool,
    pub favorite_id: Uuid,
}

/// The favorite operations the toggle state machine needs. Kept as a trait
/// so the state machine is testable without a running server.
#[async_trait]
pub trait FavoritesApi {
    async fn add_favorite(&self, article_id: Uuid) -> Result<FavoriteStatus, ApiError>;
    async fn remove_favorite(&self, favorite_id: Uuid) -> Result<FavoriteStatus, ApiError>;
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach the bearer token obtained from /api/auth/login.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn unwrap_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let envelope: Envelope<T> = response.json().await?;

        if !status.is_success() {
            return Err(ApiError {
                status: Some(status.as_u16()),
                message: envelope.message,
            });
        }

        envelope.data.ok_or(ApiError {
            status: Some(status.as_u16()),
            message: "Response carried no data".to_string(),
        })
    }
}

#[async_trait]
impl FavoritesApi for ApiClient {
    async fn add_favorite(&self, article_id: Uuid) -> Result<FavoriteStatus, ApiError> {
        let url = format!("{}/api/favorites", self.base_url);
        let body = serde_json::json!({ "data": { "article": article_id } });

        let response = self
            .authorize(self.http.post(&url))
            .json(&body)
            .send()
            .await?;

        Self::unwrap_envelope(response).await
    }

    async fn remove_favorite(&self, favorite_id: Uuid) -> Result<FavoriteStatus, ApiError> {
        let url = format!("{}/api/favorites/{}", self.base_url, favorite_id);

        let response = self.authorize(self.http.delete(&url)).send().await?;

        Self::unwrap_envelope(response).await
    }
}
