// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Axum extractors for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! Use `Identity` on endpoints whose visibility depends on deployment
//! policy: it yields `RequestIdentity::Anonymous` when no credential was
//! sent, but still rejects a credential that fails verification.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::error::AuthError;
use super::gate::RequestIdentity;
use super::AuthenticatedUser;
use crate::state::AppState;

fn authorization_header(parts: &Parts) -> Result<Option<&str>, AuthError> {
    match parts.headers.get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| AuthError::InvalidAuthHeader),
    }
}

/// Extractor for authenticated users.
///
/// Validates the bearer token from the Authorization header and yields the
/// identity snapshot embedded in it.
///
/// # Example
///
/// ```rust,ignore
/// async fn checkout(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<CheckoutResponse>, ApiError> {
///     // user.user_id is the authenticated caller's ID
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts)?.ok_or(AuthError::MissingAuthHeader)?;
        match state.gate.resolve(Some(header))? {
            RequestIdentity::Authenticated(user) => Ok(Auth(user)),
            // resolve() only returns Anonymous for an absent header.
            RequestIdentity::Anonymous => Err(AuthError::MissingAuthHeader),
        }
    }
}

/// Extractor that requires the admin role.
///
/// Missing or invalid credentials reject with 401; a valid non-admin
/// identity rejects with 403.
pub struct AdminOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AdminOnly(user))
    }
}

/// Extractor for endpoints whose visibility is policy-controlled.
///
/// Unlike a permissive optional extractor, a presented token that fails
/// verification is an error here. Only the complete absence of a credential
/// yields `Anonymous`.
pub struct Identity(pub RequestIdentity);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts)?;
        Ok(Identity(state.gate.resolve(header)?))
    }
}
