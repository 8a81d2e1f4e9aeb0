// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Path constants and utilities for the storage layout.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Default base directory for persistent storage.
pub const DATA_ROOT: &str = "./data";

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user records.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user file.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    /// Directory containing uniqueness-claim files for emails and usernames.
    pub fn user_index_dir(&self) -> PathBuf {
        self.root.join("user_index")
    }

    /// Claim file for an email. The filename is the SHA-256 of the
    /// lowercased email, so arbitrary input is always filesystem safe and
    /// lookups are case-insensitive.
    pub fn email_claim(&self, email: &str) -> PathBuf {
        self.user_index_dir()
            .join(format!("email-{}.json", index_key(email)))
    }

    /// Claim file for a username.
    pub fn username_claim(&self, username: &str) -> PathBuf {
        self.user_index_dir()
            .join(format!("name-{}.json", index_key(username)))
    }

    // ========== Content Paths ==========

    /// Directory containing all content records.
    pub fn contents_dir(&self) -> PathBuf {
        self.root.join("contents")
    }

    /// Path to a specific content file.
    pub fn content(&self, content_id: &str) -> PathBuf {
        self.contents_dir().join(format!("{content_id}.json"))
    }

    // ========== Comment Paths ==========

    /// Directory containing all comment records.
    pub fn comments_dir(&self) -> PathBuf {
        self.root.join("comments")
    }

    /// Path to a specific comment file.
    pub fn comment(&self, comment_id: &str) -> PathBuf {
        self.comments_dir().join(format!("{comment_id}.json"))
    }

    // ========== Upload Paths ==========

    /// Directory containing uploaded media files.
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    /// Path to a specific uploaded file.
    pub fn upload(&self, file_name: &str) -> PathBuf {
        self.uploads_dir().join(file_name)
    }
}

fn index_key(value: &str) -> String {
    format!("{:x}", Sha256::digest(value.to_lowercase().as_bytes()))
}
