use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entities::media;
use crate::models::media_model::{CreateMediaRequest, MediaResponse};

/// Media registry. Files are hosted elsewhere; this only records the
/// metadata articles need to reference a cover image.
pub struct MediaService;

impl MediaService {
    pub async fn register_media(
        db: &DatabaseConnection,
        uploader_id: i64,
        payload: CreateMediaRequest,
    ) -> Result<MediaResponse, (StatusCode, &'static str, String)> {
        let new_media = media::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(payload.name),
            url: Set(payload.url),
            mime_type: Set(payload.mime_type),
            alt_text: Set(payload.alt_text),
            uploader_id: Set(uploader_id),
            created_at: Set(Utc::now()),
        };

        let saved = new_media.insert(db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to register media: {}", e),
            )
        })?;

        Ok(Self::map_to_response(saved))
    }

    pub async fn list_media(
        db: &DatabaseConnection,
    ) -> Result<Vec<MediaResponse>, (StatusCode, &'static str, String)> {
        let rows = media::Entity::find()
            .order_by_desc(media::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Failed to fetch media".to_string(),
                )
            })?;

        Ok(rows.into_iter().map(Self::map_to_response).collect())
    }

    fn map_to_response(model: media::Model) -> MediaResponse {
        MediaResponse {
            id: model.public_id,
            name: model.name,
            url: model.url,
            mime_type: model.mime_type,
            alt_text: model.alt_text,
        }
    }
}
