// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

use axum::{extract::State, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::{Identity, Operation},
    error::ApiError,
    models::{Comment, CreateCommentRequest, SuccessResponse},
    state::AppState,
    storage::{CommentRepository, ContentRepository},
};

#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentRequest,
    tag = "Comments",
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, description = "Missing text"),
        (status = 401, description = "Authentication required by deployment policy"),
        (status = 404, description = "Unknown content item")
    ),
    security(("bearer_token" = []))
)]
pub async fn create_comment(
    State(state): State<AppState>,
    Identity(identity): Identity,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.gate.authorize(Operation::CreateComment, &identity)?;

    if request.text.is_empty() {
        return Err(ApiError::validation("Missing text"));
    }
    if !ContentRepository::new(&state.storage).exists(&request.content_id) {
        return Err(ApiError::not_found("Content not found"));
    }

    let comment = Comment {
        id: Uuid::new_v4().to_string(),
        user_id: identity.user().map(|u| u.user_id.clone()),
        content_id: request.content_id,
        text: request.text,
        created_at: Utc::now(),
    };
    CommentRepository::new(&state.storage).create(&comment)?;

    let author = identity
        .user()
        .map(|u| u.username.as_str())
        .unwrap_or("Anonymous");
    state.notifier.dispatch(
        "New comment",
        &format!("User {author} commented: {}", comment.text),
    );

    Ok(Json(SuccessResponse::ok()))
}
