//! Authentication for the marketplace API: argon2 password storage, HS256
//! bearer tokens, and the `AuthUser` extractor protected routes rely on.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::customer;
use crate::errors::ServiceError;

pub mod user;

/// Claim structure for JWT tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,
    pub username: String,
    /// JWT ID, unique per issued token
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// Authenticated account extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub token_id: String,
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub audience: String,
    pub token_expiration: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: String, token_expiration: Duration) -> Self {
        Self {
            jwt_secret,
            issuer: "bazaar-auth".to_string(),
            audience: "bazaar-api".to_string(),
            token_expiration,
        }
    }
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 150, message = "Username must be 1 to 150 characters"))]
    pub username: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[validate(length(max = 15, message = "Phone number must be at most 15 characters"))]
    pub phone_number: String,
    #[validate(length(max = 55, message = "Address must be at most 55 characters"))]
    pub address: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Token plus the account id it was issued for
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct IssuedToken {
    pub token: String,
    pub id: i64,
}

/// Issues and validates tokens, and owns the registration/login flows
/// against the users table.
pub struct AuthService {
    config: AuthConfig,
    db: Arc<DbPool>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: AuthConfig, db: Arc<DbPool>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        Self {
            config,
            db,
            encoding_key,
            decoding_key,
        }
    }

    /// Creates the account, its customer profile, and the first token in a
    /// single transaction.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<IssuedToken, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(&input.username))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Username {} is already taken",
                input.username
            )));
        }

        let password_hash = self.hash_password(&input.password)?;

        let account = user::ActiveModel {
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        customer::ActiveModel {
            user_id: Set(account.id),
            phone_number: Set(input.phone_number),
            address: Set(input.address),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        let token = self.issue_token(&account)?;
        Ok(IssuedToken {
            token,
            id: account.id,
        })
    }

    /// Verifies the credentials. Returns `None` on a bad username or
    /// password; the two cases are indistinguishable to the caller.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<Option<IssuedToken>, ServiceError> {
        let account = user::Entity::find()
            .filter(user::Column::Username.eq(&input.username))
            .one(&*self.db)
            .await?;

        let account = match account {
            Some(account) => account,
            None => return Ok(None),
        };

        if !self.verify_password(&input.password, &account.password_hash) {
            return Ok(None);
        }

        let token = self.issue_token(&account)?;
        Ok(Some(IssuedToken {
            token,
            id: account.id,
        }))
    }

    /// Signs a token for the given account.
    pub fn issue_token(&self, account: &user::Model) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.config.token_expiration.as_secs() as i64,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::AuthError(format!("Failed to sign token: {e}")))
    }

    /// Decodes and validates a bearer token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| ServiceError::AuthError("Invalid or expired token".to_string()))
    }

    pub fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ServiceError::HashError(e.to_string()))
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AuthService>: FromRef<S>,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = Arc::<AuthService>::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ServiceError::AuthError("Missing authorization header".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| {
                ServiceError::AuthError("Authorization header must be a bearer token".to_string())
            })?;

        let claims = auth_service.validate_token(token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| ServiceError::AuthError("Malformed token subject".to_string()))?;

        Ok(AuthUser {
            user_id,
            username: claims.username,
            token_id: claims.jti,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        // The connection is never touched by the token/hash helpers.
        let db = Arc::new(sea_orm::DatabaseConnection::default());
        AuthService::new(
            AuthConfig::new(
                "a_unit_test_secret_that_is_long_enough_for_validation".to_string(),
                Duration::from_secs(60),
            ),
            db,
        )
    }

    #[test]
    fn issued_tokens_round_trip() {
        let svc = service();
        let account = user::Model {
            id: 7,
            username: "margarita".to_string(),
            email: "m@example.com".to_string(),
            password_hash: String::new(),
            first_name: "Rita".to_string(),
            last_name: "Ortega".to_string(),
            created_at: Utc::now(),
        };

        let token = svc.issue_token(&account).expect("token should sign");
        let claims = svc.validate_token(&token).expect("token should validate");
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "margarita");
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let svc = service();
        assert!(svc.validate_token("not.a.token").is_err());
    }

    #[test]
    fn password_hashes_verify_and_mismatch() {
        let svc = service();
        let hash = svc.hash_password("agave123").expect("hash");
        assert!(hash.starts_with("$argon2"));
        assert!(svc.verify_password("agave123", &hash));
        assert!(!svc.verify_password("agave124", &hash));
    }
}
