// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! # Authentication Module
//!
//! Token-based authentication and role-gated authorization for the
//! Adipotech API.
//!
//! ## Auth Flow
//!
//! 1. Client registers (`/api/register`) and logs in (`/api/login`)
//! 2. Login issues an HS256 bearer token carrying a snapshot of the
//!    identity (`sub`, `username`, `role`, `premium`) valid for 7 days
//! 3. Client sends `Authorization: Bearer <token>` on later requests
//! 4. Server verifies signature and expiry, then checks the operation
//!    against the access policy
//!
//! ## Security
//!
//! - Token claims are frozen at issuance; role or premium changes take
//!   effect at the next login
//! - All verification failures collapse to one `invalid_token` error so
//!   responses leak nothing about why a token was rejected
//! - A presented token is always verified, even on public endpoints
//! - Clock skew tolerance is 60 seconds

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod password;
pub mod roles;
pub mod token;

pub use authenticator::Authenticator;
pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth, Identity};
pub use gate::{AccessGate, AccessPolicy, Operation, RequestIdentity, Visibility};
pub use roles::Role;
pub use token::TokenCodec;
