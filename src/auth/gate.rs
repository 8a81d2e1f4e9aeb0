// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Central authorization: every request resolves to an identity, every
//! operation is checked against one policy table.
//!
//! Two rules hold everywhere:
//!
//! - A presented token is always verified, even on operations that allow
//!   anonymous callers. A bad token is rejected outright rather than
//!   silently downgraded to anonymous, so a client with a broken or expired
//!   token finds out immediately instead of seeing phantom permission
//!   errors later.
//! - Role checks distinguish "who are you" from "what may you do": missing
//!   or bad credentials are 401, a valid identity without the required role
//!   is 403.

use std::sync::Arc;

use super::claims::AuthenticatedUser;
use super::error::AuthError;
use super::roles::Role;
use super::token::TokenCodec;

/// Who may invoke an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Anonymous callers allowed.
    Public,
    /// Any authenticated identity required.
    Authenticated,
}

impl Visibility {
    /// Locked-down by default; deployments opt in to public access.
    pub fn from_public_toggle(public: bool) -> Self {
        if public {
            Visibility::Public
        } else {
            Visibility::Authenticated
        }
    }
}

/// The operations the gate knows how to authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    ListContents,
    CreateComment,
    Checkout,
    Complete,
    UploadMedia,
    AdminData,
}

/// Per-deployment visibility of the toggleable read/write surfaces.
///
/// Operations not listed here have fixed requirements: register and login
/// are always public, checkout always needs an identity, and the admin
/// surface always needs the admin role.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    pub contents: Visibility,
    pub comments: Visibility,
    pub ai: Visibility,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            contents: Visibility::Authenticated,
            comments: Visibility::Authenticated,
            ai: Visibility::Authenticated,
        }
    }
}

/// What a request proved about its caller.
#[derive(Debug, Clone)]
pub enum RequestIdentity {
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl RequestIdentity {
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            RequestIdentity::Anonymous => None,
            RequestIdentity::Authenticated(user) => Some(user),
        }
    }
}

/// Resolves credentials to identities and identities to permissions.
pub struct AccessGate {
    codec: Arc<TokenCodec>,
    policy: AccessPolicy,
}

impl AccessGate {
    pub fn new(codec: Arc<TokenCodec>, policy: AccessPolicy) -> Self {
        Self { codec, policy }
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Resolve an `Authorization` header value to an identity.
    ///
    /// An absent header is anonymous. A present header must be a valid
    /// bearer token; anything else is an error, never anonymous.
    pub fn resolve(&self, header: Option<&str>) -> Result<RequestIdentity, AuthError> {
        let Some(header) = header else {
            return Ok(RequestIdentity::Anonymous);
        };

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let user = self.codec.verify(token)?;
        Ok(RequestIdentity::Authenticated(user))
    }

    /// Check whether `identity` may invoke `operation`.
    pub fn authorize(
        &self,
        operation: Operation,
        identity: &RequestIdentity,
    ) -> Result<(), AuthError> {
        match operation {
            Operation::Register | Operation::Login => Ok(()),
            Operation::ListContents => self.require(self.policy.contents, identity),
            Operation::CreateComment => self.require(self.policy.comments, identity),
            Operation::Complete => self.require(self.policy.ai, identity),
            Operation::Checkout => self.require(Visibility::Authenticated, identity),
            Operation::UploadMedia | Operation::AdminData => self.require_role(Role::Admin, identity),
        }
    }

    fn require(&self, visibility: Visibility, identity: &RequestIdentity) -> Result<(), AuthError> {
        match visibility {
            Visibility::Public => Ok(()),
            Visibility::Authenticated => match identity {
                RequestIdentity::Authenticated(_) => Ok(()),
                RequestIdentity::Anonymous => Err(AuthError::MissingAuthHeader),
            },
        }
    }

    fn require_role(&self, role: Role, identity: &RequestIdentity) -> Result<(), AuthError> {
        match identity {
            RequestIdentity::Anonymous => Err(AuthError::MissingAuthHeader),
            RequestIdentity::Authenticated(user) if user.has_role(role) => Ok(()),
            RequestIdentity::Authenticated(_) => Err(AuthError::InsufficientPermissions),
        }
    }
}
