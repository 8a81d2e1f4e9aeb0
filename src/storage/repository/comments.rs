// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Comment repository.

use super::super::{JsonStorage, StorageError, StorageResult};
use crate::models::Comment;

/// Repository for comments on content items.
pub struct CommentRepository<'a> {
    storage: &'a JsonStorage,
}

impl<'a> CommentRepository<'a> {
    pub fn new(storage: &'a JsonStorage) -> Self {
        Self { storage }
    }

    /// Get a comment by ID.
    pub fn get(&self, comment_id: &str) -> StorageResult<Comment> {
        let path = self.storage.paths().comment(comment_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Comment {comment_id}")));
        }
        self.storage.read_json(path)
    }

    /// Persist a new comment.
    pub fn create(&self, comment: &Comment) -> StorageResult<()> {
        self.storage
            .write_json(self.storage.paths().comment(&comment.id), comment)
    }

    /// List all comments, oldest first.
    pub fn list_all(&self) -> StorageResult<Vec<Comment>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().comments_dir(), "json")?;

        let mut comments = Vec::new();
        for id in ids {
            if let Ok(comment) = self.get(&id) {
                comments.push(comment);
            }
        }

        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    /// List comments for a single content item, oldest first.
    pub fn list_by_content(&self, content_id: &str) -> StorageResult<Vec<Comment>> {
        let mut comments = self.list_all()?;
        comments.retain(|c| c.content_id == content_id);
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn test_storage() -> (JsonStorage, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let mut storage = JsonStorage::new(StoragePaths::new(dir.path()));
        storage.initialize().expect("initialize storage");
        (storage, dir)
    }

    fn test_comment(id: &str, content_id: &str, age_minutes: i64) -> Comment {
        Comment {
            id: id.to_string(),
            user_id: Some("u-1".to_string()),
            content_id: content_id.to_string(),
            text: "hello".to_string(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[test]
    fn create_and_list_oldest_first() {
        let (storage, _dir) = test_storage();
        let repo = CommentRepository::new(&storage);

        repo.create(&test_comment("cm-2", "c-1", 5)).unwrap();
        repo.create(&test_comment("cm-1", "c-1", 10)).unwrap();

        let ids: Vec<String> = repo.list_all().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["cm-1", "cm-2"]);
    }

    #[test]
    fn list_by_content_filters() {
        let (storage, _dir) = test_storage();
        let repo = CommentRepository::new(&storage);

        repo.create(&test_comment("cm-1", "c-1", 10)).unwrap();
        repo.create(&test_comment("cm-2", "c-2", 5)).unwrap();

        let for_c1 = repo.list_by_content("c-1").unwrap();
        assert_eq!(for_c1.len(), 1);
        assert_eq!(for_c1[0].id, "cm-1");
    }

    #[test]
    fn anonymous_comment_round_trips() {
        let (storage, _dir) = test_storage();
        let repo = CommentRepository::new(&storage);

        let mut comment = test_comment("cm-1", "c-1", 0);
        comment.user_id = None;
        repo.create(&comment).unwrap();

        assert_eq!(repo.get("cm-1").unwrap().user_id, None);
    }
}
