// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

use axum::{extract::State, Json};

use crate::{
    auth::{Identity, Operation},
    error::ApiError,
    models::Content,
    state::AppState,
    storage::ContentRepository,
};

#[utoipa::path(
    get,
    path = "/api/contents",
    tag = "Contents",
    responses(
        (status = 200, body = [Content], description = "All content items, newest first"),
        (status = 401, description = "Authentication required by deployment policy")
    ),
    security(("bearer_token" = []))
)]
pub async fn list_contents(
    State(state): State<AppState>,
    Identity(identity): Identity,
) -> Result<Json<Vec<Content>>, ApiError> {
    state.gate.authorize(Operation::ListContents, &identity)?;

    let contents = ContentRepository::new(&state.storage).list_all()?;
    Ok(Json(contents))
}
