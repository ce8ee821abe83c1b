pub use sea_orm_migration::prelude::*;

mod m20260830_000001_create_users;
mod m20260830_000002_create_categories_and_media;
mod m20260830_000003_create_articles;
mod m20260830_000004_create_favorites;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260830_000001_create_users::Migration),
            Box::new(m20260830_000002_create_categories_and_media::Migration),
            Box::new(m20260830_000003_create_articles::Migration),
            Box::new(m20260830_000004_create_favorites::Migration),
        ]
    }
}
