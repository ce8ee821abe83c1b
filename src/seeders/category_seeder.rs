use crate::entities::category;
use chrono::Utc;
use sea_orm::*;
use slug::slugify;
use uuid::Uuid;

const DEFAULT_CATEGORIES: &[&str] = &["Politics", "Economy", "Culture", "Science", "Sport"];

pub async fn seed_categories(db: &DatabaseConnection) -> Result<(), String> {
    for name in DEFAULT_CATEGORIES {
        let slug = slugify(name);

        let exists = category::Entity::find()
            .filter(category::Column::Slug.eq(&slug))
            .one(db)
            .await
            .map_err(|e| e.to_string())?;

        if exists.is_none() {
            let new_category = category::ActiveModel {
                id: NotSet,
                public_id: Set(Uuid::now_v7()),
                name: Set(String::from(*name)),
                slug: Set(slug),
                created_at: Set(Utc::now()),
            };
            new_category.insert(db).await.map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn category_row(id: i64, name: &str) -> category::Model {
        category::Model {
            id,
            public_id: Uuid::now_v7(),
            name: name.to_owned(),
            slug: slugify(name),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn seeding_skips_existing_categories() {
        let mut mock = MockDatabase::new(DatabaseBackend::Postgres);
        for (i, name) in DEFAULT_CATEGORIES.iter().enumerate() {
            mock = mock.append_query_results(vec![vec![category_row(i as i64 + 1, name)]]);
        }
        let db = mock.into_connection();

        // Only the five existence checks are mocked; an insert would run
        // out of results and surface as an error.
        seed_categories(&db).await.unwrap();
    }

    #[tokio::test]
    async fn seeding_creates_missing_categories() {
        let mut mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<category::Model>::new()])
            .append_query_results(vec![vec![category_row(1, DEFAULT_CATEGORIES[0])]]);
        for (i, name) in DEFAULT_CATEGORIES.iter().enumerate().skip(1) {
            mock = mock.append_query_results(vec![vec![category_row(i as i64 + 1, name)]]);
        }
        let db = mock.into_connection();

        seed_categories(&db).await.unwrap();
    }
}
