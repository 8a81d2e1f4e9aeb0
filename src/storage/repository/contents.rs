// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Content repository.

use super::super::{JsonStorage, StorageError, StorageResult};
use crate::models::Content;

/// Repository for published content items.
pub struct ContentRepository<'a> {
    storage: &'a JsonStorage,
}

impl<'a> ContentRepository<'a> {
    pub fn new(storage: &'a JsonStorage) -> Self {
        Self { storage }
    }

    /// Check if a content item exists.
    pub fn exists(&self, content_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().content(content_id))
    }

    /// Get a content item by ID.
    pub fn get(&self, content_id: &str) -> StorageResult<Content> {
        let path = self.storage.paths().content(content_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Content {content_id}")));
        }
        self.storage.read_json(path)
    }

    /// Persist a new content item.
    pub fn create(&self, content: &Content) -> StorageResult<()> {
        if self.exists(&content.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Content {}",
                content.id
            )));
        }
        self.storage
            .write_json(self.storage.paths().content(&content.id), content)
    }

    /// List all content items, newest first.
    pub fn list_all(&self) -> StorageResult<Vec<Content>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().contents_dir(), "json")?;

        let mut contents = Vec::new();
        for id in ids {
            if let Ok(content) = self.get(&id) {
                contents.push(content);
            }
        }

        contents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contents)
    }
}
