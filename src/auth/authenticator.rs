// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Registration and login against the credential store.

use std::sync::Arc;

use chrono::Utc;
use tokio::task;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::roles::Role;
use super::token::TokenCodec;
use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::storage::{JsonStorage, StorageError, UserRepository};

/// Username of the seeded administrator account.
pub const ADMIN_USERNAME: &str = "admin";

/// Email of the seeded administrator account.
pub const ADMIN_EMAIL: &str = "admin@local";

/// Verifies credentials against the store and issues bearer tokens.
pub struct Authenticator {
    storage: Arc<JsonStorage>,
    codec: Arc<TokenCodec>,
}

impl Authenticator {
    pub fn new(storage: Arc<JsonStorage>, codec: Arc<TokenCodec>) -> Self {
        Self { storage, codec }
    }

    /// Register a new identity with role `user` and no premium entitlement.
    ///
    /// Empty fields are a validation error; a taken email or username is a
    /// conflict. The uniqueness check and insert are atomic at the storage
    /// layer, so concurrent duplicates resolve to exactly one success.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
            return Err(ApiError::validation("Missing fields"));
        }

        let password = request.password.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ApiError::internal(format!("hash task failed: {e}")))?
            .map_err(|e| ApiError::internal(e.to_string()))?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: request.username,
            email: request.email,
            password_hash,
            role: Role::User,
            premium: false,
            created_at: Utc::now(),
        };

        UserRepository::new(&self.storage)
            .create(&user)
            .map_err(|e| match e {
                StorageError::AlreadyExists(_) => ApiError::conflict("User already exists"),
                other => other.into(),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Verify email and password, returning a fresh token and the stored
    /// user on success.
    ///
    /// Unknown email and wrong password produce the identical error; the
    /// response never reveals whether the account exists.
    pub async fn login(&self, request: LoginRequest) -> Result<(String, User), ApiError> {
        let user = UserRepository::new(&self.storage)
            .find_by_email(&request.email)
            .map_err(|_| ApiError::unauthorized("Invalid credentials"))?;

        let hash = user.password_hash.clone();
        let password = request.password;
        let valid = task::spawn_blocking(move || verify_password(&hash, &password))
            .await
            .map_err(|e| ApiError::internal(format!("verify task failed: {e}")))?;

        if !valid {
            return Err(ApiError::unauthorized("Invalid credentials"));
        }

        let token = self
            .codec
            .issue(&user)
            .map_err(|e| ApiError::internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "login succeeded");
        Ok((token, user))
    }

    /// Create the distinguished admin identity if it does not exist yet.
    ///
    /// Seeded with the configured password (default `adminpass`). This is a
    /// deliberate carry-over from the legacy deployment that downstream
    /// tooling depends on; the password MUST be rotated before production
    /// use. Returns true if the admin was created by this call.
    pub async fn ensure_admin(&self, password: &str) -> Result<bool, ApiError> {
        let repo = UserRepository::new(&self.storage);
        if repo.find_by_username(ADMIN_USERNAME).is_ok() {
            return Ok(false);
        }

        let password = password.to_string();
        let password_hash = task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ApiError::internal(format!("hash task failed: {e}")))?
            .map_err(|e| ApiError::internal(e.to_string()))?;

        let admin = User {
            id: Uuid::new_v4().to_string(),
            username: ADMIN_USERNAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash,
            role: Role::Admin,
            premium: true,
            created_at: Utc::now(),
        };

        match repo.create(&admin) {
            Ok(()) => Ok(true),
            // Lost a race against a concurrent seeder; the admin exists.
            Err(StorageError::AlreadyExists(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use axum::http::StatusCode;
    use tempfile::TempDir;

    fn test_authenticator() -> (Authenticator, Arc<JsonStorage>, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let mut storage = JsonStorage::new(StoragePaths::new(dir.path()));
        storage.initialize().expect("initialize storage");
        let storage = Arc::new(storage);
        let codec = Arc::new(TokenCodec::new("test-secret"));
        (Authenticator::new(storage.clone(), codec), storage, dir)
    }

    fn register_request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_succeeds_once_then_conflicts() {
        let (auth, _storage, _dir) = test_authenticator();

        auth.register(register_request("alice", "a@x.com", "pw1"))
            .await
            .unwrap();

        let err = auth
            .register(register_request("alice2", "a@x.com", "pw2"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn register_rejects_empty_fields() {
        let (auth, _storage, _dir) = test_authenticator();

        for request in [
            register_request("", "a@x.com", "pw"),
            register_request("alice", "", "pw"),
            register_request("alice", "a@x.com", ""),
        ] {
            let err = auth.register(request).await.unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn login_returns_token_with_current_snapshot() {
        let (auth, storage, _dir) = test_authenticator();

        let user = auth
            .register(register_request("alice", "a@x.com", "pw1"))
            .await
            .unwrap();
        UserRepository::new(&storage)
            .set_premium(&user.id, true)
            .unwrap();

        let (token, logged_in) = auth
            .login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "pw1".to_string(),
            })
            .await
            .unwrap();

        assert!(logged_in.premium);
        let snapshot = TokenCodec::new("test-secret").verify(&token).unwrap();
        assert_eq!(snapshot.user_id, user.id);
        assert_eq!(snapshot.role, Role::User);
        assert!(snapshot.premium);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let (auth, _storage, _dir) = test_authenticator();

        auth.register(register_request("alice", "a@x.com", "pw1"))
            .await
            .unwrap();

        let unknown_email = auth
            .login(LoginRequest {
                email: "nobody@x.com".to_string(),
                password: "pw1".to_string(),
            })
            .await
            .unwrap_err();
        let wrong_password = auth
            .login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email.message, wrong_password.message);
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let (auth, storage, _dir) = test_authenticator();

        assert!(auth.ensure_admin("adminpass").await.unwrap());
        assert!(!auth.ensure_admin("adminpass").await.unwrap());

        let admin = UserRepository::new(&storage)
            .find_by_username(ADMIN_USERNAME)
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.premium);
        assert_eq!(admin.email, ADMIN_EMAIL);
    }
}
