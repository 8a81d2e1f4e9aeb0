// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Typed repositories over the JSON file store.

pub mod comments;
pub mod contents;
pub mod users;

pub use comments::CommentRepository;
pub use contents::ContentRepository;
pub use users::UserRepository;
