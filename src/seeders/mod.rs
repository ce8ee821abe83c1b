pub mod category_seeder;
pub mod user_seeder;

use sea_orm::DatabaseConnection;

pub async fn run_seeders(db: &DatabaseConnection) -> Result<(), String> {
    // Admin first so editorial content has an owner to fall back on.
    user_seeder::seed_admin_user(db).await?;
    category_seeder::seed_categories(db).await?;
    Ok(())
}
