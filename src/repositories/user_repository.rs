use crate::entities::user::{self, Entity as User, UserRole};
use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    /// Find a user by email or username.
    pub async fn find_by_login_id(
        db: &DatabaseConnection,
        login_id: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(login_id))
                    .add(user::Column::Username.eq(login_id)),
            )
            .one(db)
            .await
    }

    /// Users colliding with either the given username or email, so the
    /// caller can report which one is taken.
    pub async fn find_duplicates(
        db: &DatabaseConnection,
        username: &str,
        email: &str,
    ) -> Result<Vec<user::Model>, DbErr> {
        User::find()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(email))
                    .add(user::Column::Username.eq(username)),
            )
            .all(db)
            .await
    }

    pub async fn create(
        db: &DatabaseConnection,
        username: String,
        email: String,
        password_hash: String,
        role: UserRole,
    ) -> Result<user::Model, DbErr> {
        let new_user = user::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };

        new_user.insert(db).await
    }
}
