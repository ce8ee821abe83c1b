use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::*;
use slug::slugify;
use uuid::Uuid;

use crate::entities::category;
use crate::models::category_model::CategoryResponse;

pub struct CategoryService;

impl CategoryService {
    pub async fn create_category(
        db: &DatabaseConnection,
        name: String,
    ) -> Result<CategoryResponse, (StatusCode, &'static str, String)> {
        let slug = slugify(&name);

        let existing = category::Entity::find()
            .filter(category::Column::Slug.eq(&slug))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Category lookup failed".to_string(),
                )
            })?;

        if existing.is_some() {
            return Err((
                StatusCode::CONFLICT,
                "CATEGORY_EXISTS",
                format!("Category '{}' already exists", name),
            ));
        }

        let new_category = category::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(name),
            slug: Set(slug),
            created_at: Set(Utc::now()),
        };

        let saved = new_category.insert(db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to create category: {}", e),
            )
        })?;

        Ok(CategoryResponse {
            id: saved.public_id,
            name: saved.name,
            slug: saved.slug,
        })
    }

    pub async fn list_categories(
        db: &DatabaseConnection,
    ) -> Result<Vec<CategoryResponse>, (StatusCode, &'static str, String)> {
        let categories = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Failed to fetch categories".to_string(),
                )
            })?;

        Ok(categories
            .into_iter()
            .map(|c| CategoryResponse {
                id: c.public_id,
                name: c.name,
                slug: c.slug,
            })
            .collect())
    }
}
