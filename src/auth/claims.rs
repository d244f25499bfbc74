// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried in a Ledgera session JWT.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Subject (user ID) - the canonical owner identifier
    pub sub: String,

    /// Issued at timestamp
    #[serde(default)]
    #[allow(dead_code)]
    pub iat: i64,

    /// Expiration timestamp
    #[serde(default)]
    pub exp: i64,

    /// Issuer
    #[serde(default)]
    pub iss: String,

    /// Session ID
    #[serde(default)]
    pub sid: Option<String>,
}

/// Authenticated user information extracted from a JWT.
///
/// This is the primary type used throughout the application to represent
/// the authenticated user making a request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user ID (`sub` claim); counters are scoped to this value
    pub user_id: String,

    /// Session ID (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Original issuer (used for logging, not serialized)
    #[serde(skip)]
    pub issuer: String,

    /// Token expiration (Unix timestamp, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Create from decoded claims.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            session_id: claims.sid,
            issuer: claims.iss,
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_claims_extracts_user_id() {
        let claims = Claims {
            sub: "user_123".to_string(),
            iat: 1700000000,
            exp: 1700003600,
            iss: "https://auth.example.com".to_string(),
            sid: Some("sess_abc".to_string()),
        };
        let user = AuthenticatedUser::from_claims(claims);
        assert_eq!(user.user_id, "user_123");
        assert_eq!(user.session_id.as_deref(), Some("sess_abc"));
        assert_eq!(user.expires_at, 1700003600);
    }
}
