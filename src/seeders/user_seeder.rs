use crate::entities::user::{self, UserRole};
use crate::services::auth_service::AuthService;
use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

pub async fn seed_admin_user(db: &DatabaseConnection) -> Result<(), String> {
    let username = "admin";
    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@newsdesk.local".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "changeme123".to_string());

    let exists = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(|e| e.to_string())?;

    if exists.is_none() {
        println!("🚀 Creating admin user...");

        let hashed_password = AuthService::hash_password(&password).map_err(|e| e.to_string())?;

        let new_user = user::ActiveModel {
            public_id: Set(Uuid::now_v7()),
            username: Set(username.to_string()),
            email: Set(email),
            password_hash: Set(hashed_password),
            role: Set(UserRole::Admin),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        new_user.insert(db).await.map_err(|e| e.to_string())?;

        println!("✅ Admin user created! (user: {})", username);
    }

    Ok(())
}
