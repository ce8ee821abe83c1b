use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::{article, favorite, favorite::Entity as Favorite};
use crate::models::article_model::{ListMeta, PaginationMeta};
use crate::models::auth_model::CurrentUser;
use crate::models::favorite_model::*;
use crate::services::article_service::ArticleService;

pub struct FavoriteService;

impl FavoriteService {
    /// Which of `article_ids` has the viewer favorited, and under which
    /// favorite record? One indexed lookup over the favorites table.
    ///
    /// This annotation is best effort: anonymous viewers get an empty map,
    /// and a lookup failure degrades to an empty map with a warning instead
    /// of failing the surrounding article fetch.
    pub async fn resolve_for_viewer(
        db: &DatabaseConnection,
        viewer: Option<&CurrentUser>,
        article_ids: &[i64],
    ) -> HashMap<i64, Uuid> {
        let Some(viewer) = viewer else {
            return HashMap::new();
        };
        if article_ids.is_empty() {
            return HashMap::new();
        }

        let rows = Favorite::find()
            .filter(favorite::Column::UserId.eq(viewer.id))
            .filter(favorite::Column::ArticleId.is_in(article_ids.to_vec()))
            .all(db)
            .await;

        match rows {
            Ok(rows) => rows.into_iter().map(|f| (f.article_id, f.public_id)).collect(),
            Err(e) => {
                tracing::warn!(user_id = viewer.id, "favorite resolution failed: {}", e);
                HashMap::new()
            }
        }
    }

    /// Idempotent add: an existing (user, article) favorite short-circuits
    /// with its id, so repeated calls never create duplicates.
    pub async fn add(
        db: &DatabaseConnection,
        viewer: &CurrentUser,
        article_public_id: Option<Uuid>,
    ) -> Result<FavoriteStatusResponse, (StatusCode, &'static str, String)> {
        let article_public_id = article_public_id.ok_or((
            StatusCode::BAD_REQUEST,
            "ARTICLE_ID_MISSING",
            "No article id supplied".to_string(),
        ))?;

        let article = article::Entity::find()
            .filter(article::Column::PublicId.eq(article_public_id))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Database error".to_string(),
                )
            })?
            .ok_or((
                StatusCode::NOT_FOUND,
                "ARTICLE_NOT_FOUND",
                "Article not found".to_string(),
            ))?;

        let existing = Favorite::find()
            .filter(favorite::Column::UserId.eq(viewer.id))
            .filter(favorite::Column::ArticleId.eq(article.id))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Favorite lookup failed".to_string(),
                )
            })?;

        if let Some(existing) = existing {
            return Ok(FavoriteStatusResponse {
                is_favorite: true,
                favorite_id: existing.public_id,
            });
        }

        let new_favorite = favorite::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            user_id: Set(viewer.id),
            article_id: Set(article.id),
            created_at: Set(Utc::now()),
        };

        let saved = new_favorite.insert(db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to create favorite: {}", e),
            )
        })?;

        Ok(FavoriteStatusResponse {
            is_favorite: true,
            favorite_id: saved.public_id,
        })
    }

    /// Idempotent remove. A missing favorite is treated as already removed;
    /// a favorite owned by someone else is never touched.
    pub async fn remove(
        db: &DatabaseConnection,
        viewer: &CurrentUser,
        favorite_public_id: Uuid,
    ) -> Result<FavoriteStatusResponse, (StatusCode, &'static str, String)> {
        let favorite = Favorite::find()
            .filter(favorite::Column::PublicId.eq(favorite_public_id))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Database error".to_string(),
                )
            })?;

        let Some(favorite) = favorite else {
            return Ok(FavoriteStatusResponse {
                is_favorite: false,
                favorite_id: favorite_public_id,
            });
        };

        if favorite.user_id != viewer.id {
            return Err((
                StatusCode::UNAUTHORIZED,
                "FAVORITE_NOT_OWNED",
                "This favorite belongs to another user".to_string(),
            ));
        }

        Favorite::delete_by_id(favorite.id).exec(db).await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                "Failed to delete favorite".to_string(),
            )
        })?;

        Ok(FavoriteStatusResponse {
            is_favorite: false,
            favorite_id: favorite.public_id,
        })
    }

    /// Every article the viewer has favorited, fully populated and
    /// annotated `is_favorite=true` with the favorite record id.
    pub async fn list_user_favorites(
        db: &DatabaseConnection,
        viewer: &CurrentUser,
    ) -> Result<FavoriteListResponse, (StatusCode, &'static str, String)> {
        let favorites = Favorite::find()
            .filter(favorite::Column::UserId.eq(viewer.id))
            .order_by_desc(favorite::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Failed to fetch favorites".to_string(),
                )
            })?;

        let article_ids: Vec<i64> = favorites.iter().map(|f| f.article_id).collect();

        let articles = if article_ids.is_empty() {
            Vec::new()
        } else {
            article::Entity::find()
                .filter(article::Column::Id.is_in(article_ids.clone()))
                .all(db)
                .await
                .map_err(|_| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_ERR",
                        "Failed to fetch favorited articles".to_string(),
                    )
                })?
        };

        // Keep the viewer's save order, newest first.
        let mut by_id: HashMap<i64, article::Model> =
            articles.into_iter().map(|a| (a.id, a)).collect();
        let ordered: Vec<article::Model> = article_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect();

        let data = ArticleService::to_responses(db, ordered, Some(viewer)).await?;
        let total = data.len() as u64;

        Ok(FavoriteListResponse {
            data,
            meta: ListMeta {
                pagination: PaginationMeta {
                    page: 1,
                    page_size: total,
                    page_count: 1,
                    total,
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn viewer(id: i64) -> CurrentUser {
        CurrentUser {
            id,
            public_id: Uuid::now_v7(),
            username: format!("reader-{}", id),
            role: UserRole::Visitor,
        }
    }

    fn favorite_row(id: i64, user_id: i64, article_id: i64) -> favorite::Model {
        favorite::Model {
            id,
            public_id: Uuid::now_v7(),
            user_id,
            article_id,
            created_at: Utc::now(),
        }
    }

    fn article_row(id: i64) -> article::Model {
        let now = Utc::now();
        article::Model {
            id,
            public_id: Uuid::now_v7(),
            title: "Harbor expansion approved".to_owned(),
            slug: format!("harbor-expansion-{}", id),
            excerpt: None,
            content: "port authority vote".to_owned(),
            category_id: None,
            author_id: None,
            cover_image_id: None,
            views: 0,
            reading_time: 1,
            featured: false,
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn anonymous_viewer_resolves_to_nothing() {
        // No queries expected; an anonymous viewer never hits the table.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let map = FavoriteService::resolve_for_viewer(&db, None, &[1, 2, 3]).await;
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn resolver_maps_article_ids_to_favorite_ids() {
        let fav = favorite_row(10, 7, 42);
        let fav_public = fav.public_id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![fav]])
            .into_connection();

        let map = FavoriteService::resolve_for_viewer(&db, Some(&viewer(7)), &[41, 42, 43]).await;

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&42), Some(&fav_public));
    }

    #[tokio::test]
    async fn resolver_degrades_to_empty_on_db_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("connection lost".to_owned())])
            .into_connection();

        let map = FavoriteService::resolve_for_viewer(&db, Some(&viewer(7)), &[1]).await;
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn add_without_article_id_is_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = FavoriteService::add(&db, &viewer(7), None).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1, "ARTICLE_ID_MISSING");
    }

    #[tokio::test]
    async fn add_is_idempotent_for_an_existing_favorite() {
        let article = article_row(42);
        let article_public = article.public_id;
        let existing = favorite_row(10, 7, 42);
        let existing_public = existing.public_id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![article]])
            .append_query_results(vec![vec![existing]])
            .into_connection();

        let res = FavoriteService::add(&db, &viewer(7), Some(article_public))
            .await
            .unwrap();

        assert!(res.is_favorite);
        assert_eq!(res.favorite_id, existing_public);
    }

    #[tokio::test]
    async fn add_creates_a_favorite_when_none_exists() {
        let article = article_row(42);
        let article_public = article.public_id;
        let inserted = favorite_row(11, 7, 42);
        let inserted_public = inserted.public_id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![article]])
            .append_query_results(vec![Vec::<favorite::Model>::new()])
            .append_query_results(vec![vec![inserted]])
            .into_connection();

        let res = FavoriteService::add(&db, &viewer(7), Some(article_public))
            .await
            .unwrap();

        assert!(res.is_favorite);
        assert_eq!(res.favorite_id, inserted_public);
    }

    #[tokio::test]
    async fn remove_of_a_missing_favorite_is_a_no_op() {
        let gone = Uuid::now_v7();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<favorite::Model>::new()])
            .into_connection();

        let res = FavoriteService::remove(&db, &viewer(7), gone).await.unwrap();

        assert!(!res.is_favorite);
        assert_eq!(res.favorite_id, gone);
    }

    #[tokio::test]
    async fn remove_rejects_a_foreign_favorite() {
        let foreign = favorite_row(10, 99, 42);
        let foreign_public = foreign.public_id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![foreign]])
            .into_connection();

        let err = FavoriteService::remove(&db, &viewer(7), foreign_public)
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.1, "FAVORITE_NOT_OWNED");
    }

    #[tokio::test]
    async fn remove_deletes_an_owned_favorite() {
        let owned = favorite_row(10, 7, 42);
        let owned_public = owned.public_id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![owned]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let res = FavoriteService::remove(&db, &viewer(7), owned_public)
            .await
            .unwrap();

        assert!(!res.is_favorite);
        assert_eq!(res.favorite_id, owned_public);
    }

    #[tokio::test]
    async fn list_annotates_every_favorited_article() {
        let article = article_row(42);
        let fav = favorite_row(10, 7, 42);
        let fav_public = fav.public_id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![fav.clone()]])
            .append_query_results(vec![vec![article]])
            .append_query_results(vec![vec![fav]])
            .into_connection();

        let res = FavoriteService::list_user_favorites(&db, &viewer(7)).await.unwrap();

        assert_eq!(res.data.len(), 1);
        assert!(res.data[0].is_favorite);
        assert_eq!(res.data[0].favorite_id, Some(fav_public));
        assert_eq!(res.meta.pagination.total, 1);
    }
}
