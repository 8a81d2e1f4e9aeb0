// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::ApiError,
    models::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, SuccessResponse},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, body = SuccessResponse),
        (status = 400, description = "Missing fields"),
        (status = 409, description = "Email or username already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    state.authenticator.register(request).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (token, user) = state.authenticator.login(request).await?;
    Ok(Json(LoginResponse {
        success: true,
        token,
        user: PublicUser::from(&user),
    }))
}
