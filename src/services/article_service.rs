use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use slug::slugify;
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::{article, article::Entity as Article, category, media, user};
use crate::models::article_model::*;
use crate::models::auth_model::CurrentUser;
use crate::models::category_model::CategoryResponse;
use crate::models::media_model::MediaResponse;
use crate::services::favorite_service::FavoriteService;
use crate::utils::reading_time;

pub struct ArticleService;

impl ArticleService {
    pub async fn create_article(
        db: &DatabaseConnection,
        author: &CurrentUser,
        payload: CreateArticleRequest,
    ) -> Result<ArticleResponse, (StatusCode, &'static str, String)> {
        let slug = match payload.slug {
            Some(s) => Self::ensure_unique_slug(db, &slugify(&s)).await?,
            None => Self::ensure_unique_slug(db, &slugify(&payload.title)).await?,
        };

        let category_id = Self::resolve_category(db, payload.category).await?;
        let cover_image_id = Self::resolve_cover_image(db, payload.cover_image).await?;

        let article = article::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            title: Set(payload.title),
            slug: Set(slug),
            excerpt: Set(payload.excerpt),
            reading_time: Set(reading_time::estimate_minutes(&payload.content)),
            content: Set(payload.content),
            category_id: Set(category_id),
            author_id: Set(Some(author.id)),
            cover_image_id: Set(cover_image_id),
            views: Set(0),
            featured: Set(payload.featured),
            published_at: Set(payload.published_at),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };

        let saved = article.insert(db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to create article: {}", e),
            )
        })?;

        let mut responses = Self::to_responses(db, vec![saved], Some(author)).await?;
        Ok(responses.remove(0))
    }

    /// Single-article fetch by public UUID or slug. Bumps the view counter
    /// as a side effect; the returned article reflects the bumped value.
    pub async fn get_article(
        db: &DatabaseConnection,
        id_or_slug: String,
        viewer: Option<&CurrentUser>,
    ) -> Result<ArticleResponse, (StatusCode, &'static str, String)> {
        let article_opt = if let Ok(uuid) = Uuid::parse_str(&id_or_slug) {
            Article::find()
                .filter(article::Column::PublicId.eq(uuid))
                .one(db)
                .await
        } else {
            Article::find()
                .filter(article::Column::Slug.eq(id_or_slug))
                .one(db)
                .await
        }
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERR",
                "Database error".to_string(),
            )
        })?;

        let mut article = article_opt.ok_or((
            StatusCode::NOT_FOUND,
            "ARTICLE_NOT_FOUND",
            "Article not found".to_string(),
        ))?;

        // Atomic increment; a failure here must not break the read path.
        match Article::update_many()
            .col_expr(
                article::Column::Views,
                Expr::col(article::Column::Views).add(1),
            )
            .filter(article::Column::Id.eq(article.id))
            .exec(db)
            .await
        {
            Ok(_) => article.views += 1,
            Err(e) => {
                tracing::warn!(article_id = article.id, "view counter update failed: {}", e)
            }
        }

        let mut responses = Self::to_responses(db, vec![article], viewer).await?;
        Ok(responses.remove(0))
    }

    pub async fn list_articles(
        db: &DatabaseConnection,
        params: ArticleFilterParams,
        viewer: Option<&CurrentUser>,
    ) -> Result<ArticleListResponse, (StatusCode, &'static str, String)> {
        let page = params.page.unwrap_or(1).max(1);
        let limit = params.limit.unwrap_or(10).clamp(1, 100);

        let mut query = Article::find();

        if let Some(slug) = params.slug {
            query = query.filter(article::Column::Slug.eq(slug));
        }

        if let Some(featured) = params.featured {
            query = query.filter(article::Column::Featured.eq(featured));
        }

        if let Some(category_slug) = params.category {
            query = query
                .join(JoinType::InnerJoin, article::Relation::Category.def())
                .filter(category::Column::Slug.eq(category_slug));
        }

        if let Some(author_public_id) = params.author {
            query = query
                .join(JoinType::InnerJoin, article::Relation::User.def())
                .filter(user::Column::PublicId.eq(author_public_id));
        }

        if let Some(search) = params.search {
            query = query.filter(
                Condition::any()
                    .add(article::Column::Title.contains(&search))
                    .add(article::Column::Content.contains(&search)),
            );
        }

        query = query
            .order_by_desc(article::Column::PublishedAt)
            .order_by_desc(article::Column::CreatedAt);

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERR",
                "Count failed".to_string(),
            )
        })?;
        let articles = paginator.fetch_page(page - 1).await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERR",
                "Fetch failed".to_string(),
            )
        })?;

        let data = Self::to_responses(db, articles, viewer).await?;

        Ok(ArticleListResponse {
            data,
            meta: ListMeta {
                pagination: PaginationMeta {
                    page,
                    page_size: limit,
                    page_count: total.div_ceil(limit.max(1)),
                    total,
                },
            },
        })
    }

    pub async fn update_article(
        db: &DatabaseConnection,
        public_id: Uuid,
        viewer: &CurrentUser,
        payload: UpdateArticleRequest,
    ) -> Result<ArticleResponse, (StatusCode, &'static str, String)> {
        let article = Article::find()
            .filter(article::Column::PublicId.eq(public_id))
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

        if article.author_id != Some(viewer.id) && !viewer.role.can_edit_any() {
            return Err((
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
                "You are not the owner of this article".to_string(),
            ));
        }

        let mut active: article::ActiveModel = article.into();

        if let Some(t) = payload.title {
            active.title = Set(t);
        }
        if let Some(s) = payload.slug {
            let slug = Self::ensure_unique_slug(db, &slugify(&s)).await?;
            active.slug = Set(slug);
        }
        if let Some(e) = payload.excerpt {
            active.excerpt = Set(Some(e));
        }
        if let Some(c) = payload.content {
            // Always recomputed when content arrives, even if unchanged.
            active.reading_time = Set(reading_time::estimate_minutes(&c));
            active.content = Set(c);
        }
        if let Some(cat) = payload.category {
            active.category_id = Set(Self::resolve_category(db, Some(cat)).await?);
        }
        if let Some(img) = payload.cover_image {
            active.cover_image_id = Set(Self::resolve_cover_image(db, Some(img)).await?);
        }
        if let Some(f) = payload.featured {
            active.featured = Set(f);
        }
        if let Some(p) = payload.published_at {
            active.published_at = Set(Some(p));
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to update article: {}", e),
            )
        })?;

        let mut responses = Self::to_responses(db, vec![updated], Some(viewer)).await?;
        Ok(responses.remove(0))
    }

    pub async fn delete_article(
        db: &DatabaseConnection,
        public_id: Uuid,
        viewer: &CurrentUser,
    ) -> Result<(), (StatusCode, &'static str, String)> {
        let article = Article::find()
            .filter(article::Column::PublicId.eq(public_id))
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

        if article.author_id != Some(viewer.id) && !viewer.role.can_edit_any() {
            return Err((
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
                "You are not the owner of this article".to_string(),
            ));
        }

        Article::delete_by_id(article.id).exec(db).await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                "Failed to delete article".to_string(),
            )
        })?;

        Ok(())
    }

    /// Batch-hydrate article rows into API responses: category, cover image
    /// and author resolved with one query each, favorite annotations via the
    /// resolver. Every response carries the annotation fields.
    pub(crate) async fn to_responses(
        db: &DatabaseConnection,
        articles: Vec<article::Model>,
        viewer: Option<&CurrentUser>,
    ) -> Result<Vec<ArticleResponse>, (StatusCode, &'static str, String)> {
        let category_ids: Vec<i64> = articles.iter().filter_map(|a| a.category_id).collect();
        let cover_ids: Vec<i64> = articles.iter().filter_map(|a| a.cover_image_id).collect();
        let author_ids: Vec<i64> = articles.iter().filter_map(|a| a.author_id).collect();

        let db_err = |_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERR",
                "Failed to fetch related records".to_string(),
            )
        };

        let mut categories: HashMap<i64, CategoryResponse> = HashMap::new();
        if !category_ids.is_empty() {
            for c in category::Entity::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(db)
                .await
                .map_err(db_err)?
            {
                categories.insert(
                    c.id,
                    CategoryResponse {
                        id: c.public_id,
                        name: c.name,
                        slug: c.slug,
                    },
                );
            }
        }

        let mut covers: HashMap<i64, MediaResponse> = HashMap::new();
        if !cover_ids.is_empty() {
            for m in media::Entity::find()
                .filter(media::Column::Id.is_in(cover_ids))
                .all(db)
                .await
                .map_err(db_err)?
            {
                covers.insert(
                    m.id,
                    MediaResponse {
                        id: m.public_id,
                        name: m.name,
                        url: m.url,
                        mime_type: m.mime_type,
                        alt_text: m.alt_text,
                    },
                );
            }
        }

        let mut authors: HashMap<i64, ArticleAuthorResponse> = HashMap::new();
        if !author_ids.is_empty() {
            for u in user::Entity::find()
                .filter(user::Column::Id.is_in(author_ids))
                .all(db)
                .await
                .map_err(db_err)?
            {
                authors.insert(
                    u.id,
                    ArticleAuthorResponse {
                        id: u.public_id,
                        username: u.username,
                    },
                );
            }
        }

        let article_ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
        let mut favorites = FavoriteService::resolve_for_viewer(db, viewer, &article_ids).await;

        Ok(articles
            .into_iter()
            .map(|a| {
                let favorite_id = favorites.remove(&a.id);
                ArticleResponse {
                    id: a.public_id,
                    title: a.title,
                    slug: a.slug,
                    excerpt: a.excerpt,
                    content: a.content,
                    category: a.category_id.and_then(|id| categories.remove(&id)),
                    cover_image: a.cover_image_id.and_then(|id| covers.remove(&id)),
                    author: a.author_id.and_then(|id| authors.remove(&id)),
                    views: a.views,
                    reading_time: a.reading_time,
                    featured: a.featured,
                    is_favorite: favorite_id.is_some(),
                    favorite_id,
                    published_at: a.published_at,
                    created_at: a.created_at,
                    updated_at: a.updated_at,
                }
            })
            .collect())
    }

    async fn ensure_unique_slug(
        db: &DatabaseConnection,
        base_slug: &str,
    ) -> Result<String, (StatusCode, &'static str, String)> {
        let mut new_slug = base_slug.to_string();
        let mut count = 1;

        while Article::find()
            .filter(article::Column::Slug.eq(&new_slug))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Slug check failed".to_string(),
                )
            })?
            .is_some()
        {
            new_slug = format!("{}-{}", base_slug, count);
            count += 1;
        }

        Ok(new_slug)
    }

    async fn resolve_category(
        db: &DatabaseConnection,
        public_id: Option<Uuid>,
    ) -> Result<Option<i64>, (StatusCode, &'static str, String)> {
        let Some(public_id) = public_id else {
            return Ok(None);
        };

        let cat = category::Entity::find()
            .filter(category::Column::PublicId.eq(public_id))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Category lookup failed".to_string(),
                )
            })?
            .ok_or((
                StatusCode::BAD_REQUEST,
                "CATEGORY_NOT_FOUND",
                format!("Category {} not found", public_id),
            ))?;

        Ok(Some(cat.id))
    }

    async fn resolve_cover_image(
        db: &DatabaseConnection,
        public_id: Option<Uuid>,
    ) -> Result<Option<i64>, (StatusCode, &'static str, String)> {
        let Some(public_id) = public_id else {
            return Ok(None);
        };

        let image = media::Entity::find()
            .filter(media::Column::PublicId.eq(public_id))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Media lookup failed".to_string(),
                )
            })?
            .ok_or((
                StatusCode::BAD_REQUEST,
                "MEDIA_NOT_FOUND",
                format!("Media {} not found", public_id),
            ))?;

        Ok(Some(image.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn article_row(id: i64, views: i64) -> article::Model {
        let now = Utc::now();
        article::Model {
            id,
            public_id: Uuid::now_v7(),
            title: "Budget hearings resume".to_owned(),
            slug: "budget-hearings-resume".to_owned(),
            excerpt: None,
            content: "city council budget".to_owned(),
            category_id: None,
            author_id: None,
            cover_image_id: None,
            views,
            reading_time: 1,
            featured: false,
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn get_article_bumps_the_view_counter() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![article_row(1, 7)]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let res = ArticleService::get_article(&db, "budget-hearings-resume".to_string(), None)
            .await
            .unwrap();

        assert_eq!(res.views, 8);
        assert!(!res.is_favorite);
        assert!(res.favorite_id.is_none());
    }

    #[tokio::test]
    async fn get_article_survives_a_failed_counter_update() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![article_row(1, 7)]])
            .append_exec_errors(vec![DbErr::Custom("counter down".to_owned())])
            .into_connection();

        let res = ArticleService::get_article(&db, "budget-hearings-resume".to_string(), None)
            .await
            .unwrap();

        assert_eq!(res.views, 7);
    }

    #[tokio::test]
    async fn missing_article_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<article::Model>::new()])
            .into_connection();

        let err = ArticleService::get_article(&db, "no-such-slug".to_string(), None)
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1, "ARTICLE_NOT_FOUND");
    }

    #[tokio::test]
    async fn list_can_be_scoped_to_one_author() {
        let author = user::Model {
            id: 5,
            public_id: Uuid::now_v7(),
            username: "desk-reporter".to_owned(),
            email: "reporter@newsdesk.local".to_owned(),
            password_hash: "x".to_owned(),
            role: UserRole::Author,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let author_public = author.public_id;

        let mut row = article_row(1, 0);
        row.author_id = Some(author.id);

        let count_row = std::collections::BTreeMap::from([(
            "num_items",
            sea_orm::Value::from(1i64),
        )]);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row]])
            .append_query_results(vec![vec![row]])
            .append_query_results(vec![vec![author]])
            .into_connection();

        let res = ArticleService::list_articles(
            &db,
            ArticleFilterParams {
                page: None,
                limit: None,
                category: None,
                author: Some(author_public),
                featured: None,
                slug: None,
                search: None,
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(res.meta.pagination.total, 1);
        assert_eq!(res.data.len(), 1);
        assert_eq!(res.data[0].author.as_ref().unwrap().id, author_public);
    }

    #[tokio::test]
    async fn update_requires_ownership() {
        let mut row = article_row(1, 0);
        row.author_id = Some(5);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let outsider = CurrentUser {
            id: 6,
            public_id: Uuid::now_v7(),
            username: "someone-else".to_owned(),
            role: UserRole::Author,
        };

        let err = ArticleService::update_article(
            &db,
            Uuid::now_v7(),
            &outsider,
            UpdateArticleRequest {
                title: Some("hijack".to_owned()),
                slug: None,
                excerpt: None,
                content: None,
                category: None,
                cover_image: None,
                featured: None,
                published_at: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::FORBIDDEN);
    }
}
