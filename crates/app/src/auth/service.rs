//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::auth::{
    ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken, User,
    UserUuid, build_verifier_input, format_api_token, generate_api_token_secret,
    hash_verifier_input, parse_api_token, repository::PgAuthRepository, verifier_matches,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn create_user(&self, name: &str) -> Result<User, AuthServiceError> {
        self.repository
            .create_user(UserUuid::new(), name.trim())
            .await
            .map_err(AuthServiceError::from)
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the database insertion fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        self.repository
            .get_user(user_uuid)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let token_hash = hash_verifier_input(&build_verifier_input(
            &token_uuid,
            version,
            &user_uuid,
            &secret,
        ));

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user_uuid: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_user(user_uuid)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError> {
        let parsed_token =
            parse_api_token(bearer_token).map_err(|_error| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let computed = hash_verifier_input(&build_verifier_input(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.user.uuid,
            &parsed_token.secret,
        ));

        if !verifier_matches(&computed, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        if let Err(error) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            warn!("failed to record api token use: {error}");
        }

        Ok(token.user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user that owns it.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError>;
}
