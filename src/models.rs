// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! # API Data Models
//!
//! Request and response structures for the REST API plus the stored record
//! types. All types derive `Serialize`, `Deserialize`, and `ToSchema` for
//! automatic JSON handling and OpenAPI documentation.
//!
//! Wire names are camelCase (`contentId`, `createdAt`); the legacy clients
//! of this API predate the Rust server and that is the format they speak.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// =============================================================================
// Identity
// =============================================================================

/// A registered principal. This is the stored record, not a wire type:
/// responses expose [`PublicUser`] instead, so `password_hash` never
/// reaches a client even though it round-trips through storage. It must
/// never be logged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique, immutable identifier assigned at creation.
    pub id: String,
    /// Unique display name.
    pub username: String,
    /// Unique login key.
    pub email: String,
    /// Argon2id PHC hash of the password.
    #[schema(ignore)]
    pub password_hash: String,
    /// Role, defaults to `user`.
    #[serde(default)]
    pub role: Role,
    /// Premium entitlement, set via payment confirmation or admin grant.
    #[serde(default)]
    pub premium: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// The user fields exposed in the login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PublicUser {
    pub username: String,
    pub role: Role,
    pub premium: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
            premium: user.premium,
        }
    }
}

// =============================================================================
// Content
// =============================================================================

/// A published content item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Unique identifier for this item.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Media type label (e.g. "video", "article").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Storage reference for the uploaded file.
    pub url: String,
    /// Whether this item requires the premium entitlement.
    pub premium: bool,
    /// When the item was published.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Comment
// =============================================================================

/// Free-text feedback tied to a content item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier for this comment.
    pub id: String,
    /// Commenting user, or null for an anonymous comment (only possible
    /// when the comment policy allows anonymous posting).
    pub user_id: Option<String>,
    /// The content item this comment refers to.
    pub content_id: String,
    /// Comment body.
    pub text: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Requests / Responses
// =============================================================================

/// Request body for POST /api/register.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for POST /api/login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body for POST /api/login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    /// Bearer token, valid for seven days.
    pub token: String,
    pub user: PublicUser,
}

/// Request body for POST /api/comments.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content_id: String,
    pub text: String,
}

/// Generic success acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response body for POST /api/admin/upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    /// Storage reference of the uploaded file.
    pub url: String,
}

/// Response body for GET /api/admin/data.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminDataResponse {
    pub contents: Vec<Content>,
    pub comments: Vec<Comment>,
}

/// Response body for POST /api/create-checkout-session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponse {
    /// External payment redirect URL.
    pub url: String,
}

/// A single chat message for the AI completion proxy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ChatMessage {
    /// "user", "assistant" or "system".
    pub role: String,
    pub content: String,
}

/// Request body for POST /api/ai. Either `prompt` or `messages` must be set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AiRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}

/// Response body for POST /api/ai.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AiResponse {
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_user_round_trips_password_hash() {
        // The stored record must keep the hash intact, or a registered
        // user could never log in again.
        let user = User {
            id: "u-1".into(),
            username: "alice".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::User,
            premium: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let loaded: User = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.password_hash, "$argon2id$secret");
    }

    #[test]
    fn public_user_carries_no_credential_fields() {
        let json = serde_json::to_string(&PublicUser {
            username: "alice".into(),
            role: Role::User,
            premium: false,
        })
        .unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("email"));
    }

    #[test]
    fn content_uses_legacy_wire_names() {
        let content = Content {
            id: "c-1".into(),
            title: "t".into(),
            description: "d".into(),
            content_type: "video".into(),
            url: "/uploads/abc.mp4".into(),
            premium: true,
            created_at: Utc::now(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&content).unwrap()).unwrap();
        assert_eq!(json["type"], "video");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("content_type").is_none());
    }

    #[test]
    fn comment_request_parses_camel_case() {
        let req: CreateCommentRequest =
            serde_json::from_str(r#"{"contentId":"c-9","text":"hi"}"#).unwrap();
        assert_eq!(req.content_id, "c-9");
        assert_eq!(req.text, "hi");
    }

    #[test]
    fn anonymous_comment_serializes_null_user() {
        let comment = Comment {
            id: "cm-1".into(),
            user_id: None,
            content_id: "c-1".into(),
            text: "hello".into(),
            created_at: Utc::now(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&comment).unwrap()).unwrap();
        assert!(json["userId"].is_null());
    }
}
