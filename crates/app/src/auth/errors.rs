//! Auth service errors.

use thiserror::Error;

use crate::auth::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The bearer token is unknown, revoked, expired or does not verify.
    #[error("api token not recognised")]
    NotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("auth storage failure")]
    Sql(#[from] sqlx::Error),

    #[error("api token could not be processed")]
    Token(#[from] ApiTokenError),
}
