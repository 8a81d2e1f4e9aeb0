// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

use axum::{extract::State, Json};

use crate::{auth::Auth, error::ApiError, models::CheckoutResponse, state::AppState};

#[utoipa::path(
    post,
    path = "/api/create-checkout-session",
    tag = "Payments",
    responses(
        (status = 200, body = CheckoutResponse),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 502, description = "Payment provider unavailable or rejected the request")
    ),
    security(("bearer_token" = []))
)]
pub async fn create_checkout_session(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let payments = state
        .payments
        .as_ref()
        .ok_or_else(|| ApiError::upstream("Payment provider not configured"))?;

    let url = payments
        .create_checkout_session(&user.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user.user_id, "checkout session failed");
            ApiError::upstream("Payment error")
        })?;

    Ok(Json(CheckoutResponse { url }))
}
