// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! User repository.
//!
//! Each user is one JSON file under `users/`, plus two claim files under
//! `user_index/` that pin the email and username. The claim files are
//! created exclusively, which makes registration's check-then-insert
//! atomic: of N concurrent registrations with the same email, exactly one
//! creates the claim and the rest fail with `AlreadyExists`.

use serde::{Deserialize, Serialize};

use super::super::{JsonStorage, StorageError, StorageResult};
use crate::models::User;

/// Payload of a uniqueness-claim file: which user holds the claim.
#[derive(Debug, Serialize, Deserialize)]
struct IndexEntry {
    user_id: String,
}

/// Repository for user records.
pub struct UserRepository<'a> {
    storage: &'a JsonStorage,
}

impl<'a> UserRepository<'a> {
    pub fn new(storage: &'a JsonStorage) -> Self {
        Self { storage }
    }

    /// Persist a new user, claiming their email and username.
    ///
    /// Fails with `AlreadyExists` if either is taken. A half-claimed state
    /// (email claimed, username taken) is rolled back before returning.
    pub fn create(&self, user: &User) -> StorageResult<()> {
        let entry = IndexEntry {
            user_id: user.id.clone(),
        };

        let email_claim = self.storage.paths().email_claim(&user.email);
        self.storage
            .create_json(&email_claim, &entry)
            .map_err(|e| match e {
                StorageError::AlreadyExists(_) => {
                    StorageError::AlreadyExists(format!("User with email {}", user.email))
                }
                other => other,
            })?;

        let username_claim = self.storage.paths().username_claim(&user.username);
        if let Err(e) = self.storage.create_json(&username_claim, &entry) {
            let _ = self.storage.delete(&email_claim);
            return Err(match e {
                StorageError::AlreadyExists(_) => {
                    StorageError::AlreadyExists(format!("User with username {}", user.username))
                }
                other => other,
            });
        }

        if let Err(e) = self.storage.write_json(self.storage.paths().user(&user.id), user) {
            let _ = self.storage.delete(&email_claim);
            let _ = self.storage.delete(&username_claim);
            return Err(e);
        }

        Ok(())
    }

    /// Get a user by ID.
    pub fn get(&self, user_id: &str) -> StorageResult<User> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.read_json(path)
    }

    /// Find a user by email (case-insensitive).
    pub fn find_by_email(&self, email: &str) -> StorageResult<User> {
        let claim = self.storage.paths().email_claim(email);
        if !self.storage.exists(&claim) {
            return Err(StorageError::NotFound(format!("User with email {email}")));
        }
        let entry: IndexEntry = self.storage.read_json(claim)?;
        self.get(&entry.user_id)
    }

    /// Find a user by username (case-insensitive).
    pub fn find_by_username(&self, username: &str) -> StorageResult<User> {
        let claim = self.storage.paths().username_claim(username);
        if !self.storage.exists(&claim) {
            return Err(StorageError::NotFound(format!("User {username}")));
        }
        let entry: IndexEntry = self.storage.read_json(claim)?;
        self.get(&entry.user_id)
    }

    /// Set the premium entitlement on a stored user.
    ///
    /// Affects future logins only; tokens already issued keep the snapshot
    /// they were minted with.
    pub fn set_premium(&self, user_id: &str, premium: bool) -> StorageResult<User> {
        let mut user = self.get(user_id)?;
        user.premium = premium;
        self.storage
            .write_json(self.storage.paths().user(user_id), &user)?;
        Ok(user)
    }
}
