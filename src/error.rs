// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! API error type shared by all handlers.
//!
//! Every failure surfaced to a caller is an [`ApiError`]: an HTTP status
//! plus a message rendered as `{"error": "..."}`. The constructors map the
//! error taxonomy onto statuses:
//!
//! - validation (missing/malformed input) → 400
//! - conflict (uniqueness violation) → 409
//! - unauthorized (bad credentials, undifferentiated cause) → 401
//! - forbidden (valid identity, insufficient privilege) → 403
//! - not found → 404
//! - upstream (collaborator failed or timed out) → 502
//! - internal (everything else, logged server-side) → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::storage::StorageError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Bad credentials. Callers must pass the same message for every cause
    /// (unknown email, wrong password) to avoid account enumeration.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        if let AuthError::Internal(ref detail) = e {
            tracing::error!(error = %detail, "internal auth failure");
            return ApiError::internal("Server error");
        }
        ApiError::new(e.status_code(), e.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(entity) => ApiError::not_found(format!("Not found: {entity}")),
            StorageError::AlreadyExists(entity) => {
                ApiError::conflict(format!("Already exists: {entity}"))
            }
            other => {
                tracing::error!(error = %other, "storage failure");
                ApiError::internal("Server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
