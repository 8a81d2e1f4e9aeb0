// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Signed bearer token codec.
//!
//! Tokens are HS256 JWTs signed with a process-wide symmetric secret and
//! valid for a fixed seven-day window from issuance. Rotating the secret
//! invalidates every outstanding token; there is no migration path.
//!
//! ## Failure behavior
//!
//! [`TokenCodec::verify`] collapses every failure (malformed payload, bad
//! signature, expired token) into [`AuthError::InvalidToken`]. Callers never
//! learn which check failed, so a presented token cannot be used as an
//! expiry/signature oracle. The distinction is logged at debug level.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{AuthenticatedUser, Claims};
use super::error::AuthError;
use crate::models::User;

/// Token validity window in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Encodes and verifies signed identity assertions.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token snapshotting the user's current state.
    ///
    /// Does not fail for well-formed input; an encoding failure indicates a
    /// broken signing key and is surfaced as an internal error.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as of the given instant. Split out so tests can
    /// simulate the clock.
    pub(crate) fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, AuthError> {
        let expires = now + Duration::days(TOKEN_TTL_DAYS);
        let claims = Claims::snapshot(user, now.timestamp(), expires.timestamp());
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {e}")))
    }

    /// Verify a token and return the identity snapshot it carries.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            // Single failure kind at the boundary; detail stays server-side.
            tracing::debug!(reason = %e, "token verification failed");
            AuthError::InvalidToken
        })?;
        Ok(data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    fn codec() -> TokenCodec {
        TokenCodec::new("test-signing-secret")
    }

    fn sample_user(role: Role, premium: bool) -> User {
        User {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role,
            premium,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_verify_round_trips_snapshot() {
        let codec = codec();
        let token = codec.issue(&sample_user(Role::User, true)).unwrap();

        let user = codec.verify(&token).unwrap();
        assert_eq!(user.user_id, "u-1");
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
        assert!(user.premium);
    }

    #[test]
    fn expiry_is_seven_days_from_issuance() {
        let codec = codec();
        let issued = Utc::now();
        let token = codec.issue_at(&sample_user(Role::User, false), issued).unwrap();
        let user = codec.verify(&token).unwrap();
        assert_eq!(user.expires_at, (issued + Duration::days(7)).timestamp());
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        // Issued eight days in the past, beyond the seven-day window.
        let issued = Utc::now() - Duration::days(8);
        let token = codec.issue_at(&sample_user(Role::User, false), issued).unwrap();

        let err = codec.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let codec = codec();
        let token = codec.issue(&sample_user(Role::User, false)).unwrap();

        // Flip a byte of the signature segment.
        let mut parts: Vec<&str> = token.split('.').collect();
        let mut sig = URL_SAFE_NO_PAD.decode(parts[2]).unwrap();
        sig[0] ^= 0x01;
        let flipped = URL_SAFE_NO_PAD.encode(&sig);
        parts[2] = &flipped;
        let tampered = parts.join(".");

        let err = codec.verify(&tampered).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let codec = codec();
        let token = codec.issue(&sample_user(Role::User, false)).unwrap();

        // Rewrite the payload to claim the admin role, keeping the original
        // signature. Verification must fail.
        let parts: Vec<&str> = token.split('.').collect();
        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let escalated = String::from_utf8(payload)
            .unwrap()
            .replace(r#""role":"user""#, r#""role":"admin""#);
        let tampered = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(escalated.as_bytes()),
            parts[2]
        );

        let err = codec.verify(&tampered).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = codec().verify("not.a.token").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn different_secret_is_rejected() {
        let token = codec().issue(&sample_user(Role::Admin, true)).unwrap();
        let other = TokenCodec::new("rotated-secret");
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }
}
