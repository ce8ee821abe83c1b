use crate::config::Config;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid, // user public id
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

pub struct JwtUtils;

impl JwtUtils {
    /// Generate an access token for the given user.
    pub fn generate_jwt(user_id: Uuid, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let cfg = Config::init();
        let now = Utc::now();
        let expire = now + Duration::minutes(cfg.jwt_expires_in);
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            exp: expire.timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
    }

    /// Validate an access token and return the token data.
    pub fn validate_jwt(
        token: &str,
    ) -> Result<jsonwebtoken::TokenData<Claims>, jsonwebtoken::errors::Error> {
        let cfg = Config::init();
        let decoding_key = DecodingKey::from_secret(cfg.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        decode::<Claims>(token, &decoding_key, &validation)
    }
}
