// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! # Storage Module
//!
//! Persistence for users, contents, comments and uploaded media, backed by
//! plain JSON files under the configured data directory.
//!
//! ## Storage Layout
//!
//! ```text
//! data/
//!   users/{user_id}.json
//!   user_index/
//!     email-{sha256}.json   # uniqueness claim, maps to user_id
//!     name-{sha256}.json
//!   contents/{content_id}.json
//!   comments/{comment_id}.json
//!   uploads/{uuid}.{ext}    # raw media files
//! ```
//!
//! The uniqueness invariant for emails and usernames lives here: claim
//! files are created with an exclusive create, so concurrent registrations
//! race at the filesystem and exactly one wins.

pub mod files;
pub mod paths;
pub mod repository;

pub use files::{JsonStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{CommentRepository, ContentRepository, UserRepository};
