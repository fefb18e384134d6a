//! Auth data models.

use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::{auth::ApiTokenVersion, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// A person allowed to add products and prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,
    pub created_at: Timestamp,
}

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    /// User that owns this API token.
    pub user: User,

    /// Token format/hash version.
    pub version: ApiTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// Whether a token can still be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenStatus {
    Active,
    Expired,
    Revoked,
}

impl ApiTokenStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}

impl ApiTokenMetadata {
    /// Status at `now`. Revocation wins over expiry.
    #[must_use]
    pub fn status(&self, now: Timestamp) -> ApiTokenStatus {
        if self.revoked_at.is_some() {
            ApiTokenStatus::Revoked
        } else if self.expires_at.is_some_and(|expires_at| expires_at <= now) {
            ApiTokenStatus::Expired
        } else {
            ApiTokenStatus::Active
        }
    }
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use super::*;

    fn metadata(now: Timestamp) -> ApiTokenMetadata {
        ApiTokenMetadata {
            uuid: Uuid::now_v7(),
            user_uuid: UserUuid::new(),
            version: ApiTokenVersion::V1,
            created_at: now,
            last_used_at: None,
            expires_at: None,
            revoked_at: None,
        }
    }

    #[test]
    fn status_follows_expiry_and_revocation() -> TestResult {
        let now = Timestamp::now();
        let mut token = metadata(now);

        assert_eq!(token.status(now), ApiTokenStatus::Active);

        token.expires_at = Some(now.checked_sub(1.minute())?);
        assert_eq!(token.status(now), ApiTokenStatus::Expired);

        token.revoked_at = Some(now);
        assert_eq!(token.status(now), ApiTokenStatus::Revoked);

        Ok(())
    }
}
