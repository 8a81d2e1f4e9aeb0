// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

use axum::{extract::State, Json};

use crate::{
    auth::{Identity, Operation},
    error::ApiError,
    models::{AiRequest, AiResponse, ChatMessage},
    state::AppState,
};

/// Normalize the request into a message transcript.
///
/// `messages` wins when both are present; a bare `prompt` becomes a single
/// user message.
fn to_messages(request: AiRequest) -> Result<Vec<ChatMessage>, ApiError> {
    if let Some(messages) = request.messages {
        if messages.is_empty() {
            return Err(ApiError::validation("Missing prompt"));
        }
        return Ok(messages);
    }
    match request.prompt {
        Some(prompt) if !prompt.is_empty() => Ok(vec![ChatMessage {
            role: "user".to_string(),
            content: prompt,
        }]),
        _ => Err(ApiError::validation("Missing prompt")),
    }
}

#[utoipa::path(
    post,
    path = "/api/ai",
    request_body = AiRequest,
    tag = "Ai",
    responses(
        (status = 200, body = AiResponse),
        (status = 400, description = "Missing prompt"),
        (status = 401, description = "Authentication required by deployment policy"),
        (status = 502, description = "Completion provider unavailable or rejected the request")
    ),
    security(("bearer_token" = []))
)]
pub async fn complete(
    State(state): State<AppState>,
    Identity(identity): Identity,
    Json(request): Json<AiRequest>,
) -> Result<Json<AiResponse>, ApiError> {
    state.gate.authorize(Operation::Complete, &identity)?;

    let messages = to_messages(request)?;

    let ai = state
        .ai
        .as_ref()
        .ok_or_else(|| ApiError::upstream("Completion provider not configured"))?;

    let answer = ai.complete(&messages).await.map_err(|e| {
        tracing::error!(error = %e, "completion failed");
        ApiError::upstream("AI error")
    })?;

    Ok(Json(AiResponse { answer }))
}
