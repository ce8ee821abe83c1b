use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub name: String,

    #[serde(default)]
    #[validate(url(message = "Invalid media URL"))]
    pub url: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub mime_type: String,

    pub alt_text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub mime_type: String,
    pub alt_text: Option<String>,
}
