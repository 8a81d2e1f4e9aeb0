// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::AdminOnly,
    error::ApiError,
    models::{AdminDataResponse, Content, UploadResponse},
    state::AppState,
    storage::{CommentRepository, ContentRepository},
};

/// Accumulates the multipart fields of an upload request.
#[derive(Default)]
struct UploadForm {
    title: Option<String>,
    description: Option<String>,
    content_type: Option<String>,
    premium: bool,
    file: Option<(String, Vec<u8>)>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Failed to read file: {e}")))?;
                form.file = Some((filename, bytes.to_vec()));
            }
            "title" => form.title = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "type" => form.content_type = Some(read_text(field).await?),
            "premium" => form.premium = read_text(field).await? == "true",
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed multipart field: {e}")))
}

#[utoipa::path(
    post,
    path = "/api/admin/upload",
    tag = "Admin",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, body = UploadResponse),
        (status = 400, description = "Missing file part"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_token" = []))
)]
pub async fn upload_media(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let form = read_upload_form(multipart).await?;

    // Role check already passed; an absent file is a validation error, not
    // a permission error.
    let (filename, bytes) = form.file.ok_or_else(|| ApiError::validation("Missing file"))?;
    let url = state.storage.save_upload(&filename, &bytes)?;

    let content = Content {
        id: Uuid::new_v4().to_string(),
        title: form.title.unwrap_or_default(),
        description: form.description.unwrap_or_default(),
        content_type: form.content_type.unwrap_or_default(),
        url: url.clone(),
        premium: form.premium,
        created_at: Utc::now(),
    };
    ContentRepository::new(&state.storage).create(&content)?;

    tracing::info!(
        admin = %admin.username,
        content_id = %content.id,
        premium = content.premium,
        "content uploaded"
    );

    Ok(Json(UploadResponse { success: true, url }))
}

#[utoipa::path(
    get,
    path = "/api/admin/data",
    tag = "Admin",
    responses(
        (status = 200, body = AdminDataResponse),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_token" = []))
)]
pub async fn admin_data(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
) -> Result<Json<AdminDataResponse>, ApiError> {
    let contents = ContentRepository::new(&state.storage).list_all()?;
    let comments = CommentRepository::new(&state.storage).list_all()?;
    Ok(Json(AdminDataResponse { contents, comments }))
}
