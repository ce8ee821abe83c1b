use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::config::Config;
use crate::entities::user::{self, UserRole};
use crate::models::auth_model::ProfileResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt_utils::JwtUtils;

pub struct AuthService;

impl AuthService {
    pub async fn register_user(
        db: &DatabaseConnection,
        username: String,
        email: String,
        password: String,
    ) -> Result<user::Model, (StatusCode, &'static str, String)> {
        let duplicates = UserRepository::find_duplicates(db, &username, &email)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Database error".to_string(),
                )
            })?;

        for existing in &duplicates {
            if existing.username == username {
                return Err((
                    StatusCode::CONFLICT,
                    "USERNAME_TAKEN",
                    format!("Username '{}' is already registered", username),
                ));
            }
            if existing.email == email {
                return Err((
                    StatusCode::CONFLICT,
                    "EMAIL_TAKEN",
                    format!("Email '{}' is already registered", email),
                ));
            }
        }

        let hashed_password = Self::hash_password(&password).map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "HASH_ERR",
                "Failed to hash password".to_string(),
            )
        })?;

        // New accounts start as visitors; an admin promotes authors/editors.
        UserRepository::create(db, username, email, hashed_password, UserRole::Visitor)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_WRITE_ERR",
                    "Failed to save user".to_string(),
                )
            })
    }

    pub async fn login_user(
        db: &DatabaseConnection,
        login_id: String,
        password: String,
    ) -> Result<(String, usize), (StatusCode, &'static str, String)> {
        let user = UserRepository::find_by_login_id(db, &login_id)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Database error".to_string(),
                )
            })?
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "AUTH_FAILED",
                "Invalid username or password".to_string(),
            ))?;

        let is_valid = Self::verify_password(&password, &user.password_hash).map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "HASH_ERR",
                "Password verification failed".to_string(),
            )
        })?;

        if !is_valid {
            return Err((
                StatusCode::UNAUTHORIZED,
                "AUTH_FAILED",
                "Invalid username or password".to_string(),
            ));
        }

        let token = JwtUtils::generate_jwt(user.public_id, &user.username).map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "JWT_ERR",
                "Token generation failed".to_string(),
            )
        })?;

        let cfg = Config::init();
        let expires_at = (Utc::now() + Duration::minutes(cfg.jwt_expires_in)).timestamp() as usize;

        Ok((token, expires_at))
    }

    pub async fn get_profile(
        db: &DatabaseConnection,
        public_id: Uuid,
    ) -> Result<ProfileResponse, (StatusCode, &'static str, String)> {
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

        let user = user::Entity::find()
            .filter(user::Column::PublicId.eq(public_id))
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
                "USER_NOT_FOUND",
                "User not found".to_string(),
            ))?;

        Ok(ProfileResponse {
            id: user.public_id,
            username: user.username,
            email: user.email,
            role: user.role,
        })
    }

    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
    }

    pub fn verify_password(
        password: &str,
        hash: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        let parsed = PasswordHash::new(hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = AuthService::hash_password("korrespondent").unwrap();
        assert!(AuthService::verify_password("korrespondent", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong", &hash).unwrap());
    }
}
