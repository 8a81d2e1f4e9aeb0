// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! # External Providers
//!
//! Outbound integrations: checkout sessions, chat completions, and admin
//! notifications. Each provider is constructed from the environment at
//! startup; a missing credential disables the provider instead of failing
//! the server, and the corresponding endpoints answer 502.

pub mod checkout;
pub mod completion;
pub mod notify;

pub use checkout::{PaymentProvider, StripeCheckout};
pub use completion::{CompletionProvider, OpenAiCompletion};
pub use notify::{MailRelayNotifier, NoopNotifier, Notifier};

/// Errors shared by all outbound providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider configuration missing: {0}")]
    MissingConfig(String),

    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider rejected the request: {0}")]
    Upstream(String),

    #[error("provider response was invalid: {0}")]
    InvalidResponse(String),
}
