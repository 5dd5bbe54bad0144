//! Authentication service for user management and JWT handling
//!
//! Provides:
//! - User signup and login
//! - Password hashing with bcrypt
//! - Token issuance and verification
//! - Per-request auth context resolution

use std::sync::Arc;

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{CreateUser, UserRecord, UserStore};
use crate::error::ApiError;

/// Claims carried by an issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID (subject)
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Resolved caller identity for one request, inserted into GraphQL request
/// data when a valid bearer token names an existing user. Read-only for the
/// rest of the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
}

/// Token plus the user it was issued for
#[derive(Debug, Clone)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserRecord,
}

/// Signup input
#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds (default: 1 hour)
    pub token_lifetime: i64,
    /// Bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            token_lifetime: 60 * 60,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new auth service over a user store
    pub fn new(users: Arc<dyn UserStore>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    // ========================================================================
    // Signup / Login
    // ========================================================================

    /// Register a new user and issue a token for it
    pub async fn sign_up(&self, input: SignUpInput) -> Result<AuthPayload, ApiError> {
        if self.users.get_by_email(&input.email).await?.is_some() {
            return Err(ApiError::Conflict(format!(
                "email '{}' is already registered",
                input.email
            )));
        }

        let password_hash = self.hash_password(&input.password)?;

        let user = self
            .users
            .create(CreateUser {
                user_name: input.user_name,
                email: input.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, user_name = %user.user_name, "user signed up");

        let token = self.issue_token(&user)?;
        Ok(AuthPayload { token, user })
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or(ApiError::CredentialMismatch)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(ApiError::CredentialMismatch);
        }

        tracing::info!(user_id = %user.id, "user logged in");

        let token = self.issue_token(&user)?;
        Ok(AuthPayload { token, user })
    }

    /// Replace a user's password after verifying the current one
    pub async fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<UserRecord, ApiError> {
        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or(ApiError::NotFound("user"))?;

        if !self.verify_password(current_password, &user.password_hash)? {
            return Err(ApiError::CredentialMismatch);
        }

        let new_hash = self.hash_password(new_password)?;

        let updated = self
            .users
            .update_password(user.id, &new_hash)
            .await?
            .ok_or(ApiError::NotFound("user"))?;

        tracing::info!(user_id = %user.id, "password changed");

        Ok(updated)
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        Ok(self.users.list().await?)
    }

    // ========================================================================
    // Auth Context Resolution
    // ========================================================================

    /// Resolve a bearer token into a caller identity.
    ///
    /// Every failure degrades to anonymous rather than raising; the branches
    /// are kept distinct so the logs tell missing tokens, rejected tokens,
    /// and dangling subjects apart.
    pub async fn resolve_context(&self, token: Option<&str>) -> Option<AuthUser> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => {
                tracing::debug!("no bearer token on request, proceeding anonymously");
                return None;
            }
        };

        let claims = match self.decode_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "bearer token rejected, proceeding anonymously");
                return None;
            }
        };

        let user_id = match Uuid::parse_str(&claims.sub) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "token subject is not a valid user id");
                return None;
            }
        };

        match self.users.get_by_id(user_id).await {
            Ok(Some(user)) => Some(AuthUser {
                id: user.id,
                user_name: user.user_name,
                email: user.email,
            }),
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "token subject does not match any user");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "user lookup failed while resolving auth context");
                None
            }
        }
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Hash a password with bcrypt
    fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        Ok(hash(password, self.config.bcrypt_cost)
            .map_err(|e| anyhow!("failed to hash password: {}", e))?)
    }

    /// Verify a password against a hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ApiError> {
        Ok(verify(password, hash).map_err(|e| anyhow!("failed to verify password: {}", e))?)
    }

    /// Issue a signed token carrying the user's id
    pub fn issue_token(&self, user: &UserRecord) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id.to_string(),
            exp: (now + Duration::seconds(self.config.token_lifetime)).timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| anyhow!("failed to sign token: {}", e))?)
    }

    /// Decode and validate a token
    fn decode_token(&self, token: &str) -> jsonwebtoken::errors::Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    struct NoUsers;

    #[async_trait]
    impl UserStore for NoUsers {
        async fn create(&self, _input: CreateUser) -> Result<UserRecord> {
            unreachable!("token tests never create users")
        }
        async fn get_by_id(&self, _id: Uuid) -> Result<Option<UserRecord>> {
            Ok(None)
        }
        async fn get_by_email(&self, _email: &str) -> Result<Option<UserRecord>> {
            Ok(None)
        }
        async fn list(&self) -> Result<Vec<UserRecord>> {
            Ok(Vec::new())
        }
        async fn update_password(
            &self,
            _id: Uuid,
            _password_hash: &str,
        ) -> Result<Option<UserRecord>> {
            Ok(None)
        }
    }

    fn service(lifetime: i64) -> AuthService {
        AuthService::new(
            Arc::new(NoUsers),
            AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_lifetime: lifetime,
                bcrypt_cost: 4,
            },
        )
    }

    fn user() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            user_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let auth = service(3600);
        let user = user();
        let token = auth.issue_token(&user).unwrap();
        let claims = auth.decode_token(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = service(-3600);
        let token = auth.issue_token(&user()).unwrap();
        assert!(auth.decode_token(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = AuthService::new(
            Arc::new(NoUsers),
            AuthConfig {
                jwt_secret: "other-secret".to_string(),
                token_lifetime: 3600,
                bcrypt_cost: 4,
            },
        );
        let token = issuer.issue_token(&user()).unwrap();
        assert!(service(3600).decode_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_resolve_context_degrades_to_anonymous() {
        let auth = service(3600);

        // Missing, garbage, and dangling-subject tokens all yield None
        assert!(auth.resolve_context(None).await.is_none());
        assert!(auth.resolve_context(Some("")).await.is_none());
        assert!(auth.resolve_context(Some("not-a-jwt")).await.is_none());

        // Valid token, but the store has no such user
        let token = auth.issue_token(&user()).unwrap();
        assert!(auth.resolve_context(Some(&token)).await.is_none());
    }
}
