// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Token claims and the authenticated user snapshot.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;
use crate::models::User;

/// Claims carried inside an issued bearer token.
///
/// The token is a point-in-time capability: `role` and `premium` are frozen
/// at issuance. If the stored user changes later, outstanding tokens keep
/// the stale values until they expire or are reissued. There is no
/// out-of-band invalidation mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's unique ID
    pub sub: String,

    /// Username at issuance time
    pub username: String,

    /// Role at issuance time
    pub role: Role,

    /// Premium entitlement at issuance time
    pub premium: bool,

    /// Issued at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

/// Authenticated user information extracted from a verified token.
///
/// This is the primary type used throughout the application to represent
/// the identity making a request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user ID (token `sub` claim)
    pub user_id: String,

    /// Username snapshot
    pub username: String,

    /// Role snapshot
    pub role: Role,

    /// Premium entitlement snapshot
    pub premium: bool,

    /// Token expiration (Unix timestamp, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Check if the user has the required role.
    pub fn has_role(&self, required: Role) -> bool {
        self.role.has_privilege(required)
    }

    /// Check if this user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
            premium: claims.premium,
            expires_at: claims.exp,
        }
    }
}

impl Claims {
    /// Build claims from a stored user with the given validity window.
    pub fn snapshot(user: &User, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            premium: user.premium,
            iat: issued_at,
            exp: expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: "u-123".to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: Role::User,
            premium: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn snapshot_freezes_role_and_premium() {
        let mut user = sample_user();
        let claims = Claims::snapshot(&user, 1_700_000_000, 1_700_604_800);

        // Mutating the stored user afterwards does not affect the snapshot.
        user.role = Role::Admin;
        user.premium = false;

        assert_eq!(claims.sub, "u-123");
        assert_eq!(claims.role, Role::User);
        assert!(claims.premium);
    }

    #[test]
    fn authenticated_user_from_claims() {
        let claims = Claims::snapshot(&sample_user(), 1_700_000_000, 1_700_604_800);
        let user: AuthenticatedUser = claims.into();
        assert_eq!(user.user_id, "u-123");
        assert_eq!(user.username, "alice");
        assert_eq!(user.expires_at, 1_700_604_800);
        assert!(!user.is_admin());
        assert!(user.has_role(Role::User));
        assert!(!user.has_role(Role::Admin));
    }
}
