// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Adipotech Content Service
//!
//! Content-publishing backend: registration/login with signed bearer
//! tokens, role-gated admin uploads, premium gating behind a checkout
//! provider, and an AI completion proxy.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuance, verification, and the access gate
//! - `providers` - Outbound integrations (checkout, completions, mail)
//! - `storage` - JSON file storage and repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod state;
pub mod storage;
