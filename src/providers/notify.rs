// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Admin notification dispatch.
//!
//! Notifications are fire-and-forget: dispatch never blocks a request and
//! a delivery failure is logged, never surfaced to the caller.

use std::{env, time::Duration};

use reqwest::Client;
use serde_json::json;

use super::ProviderError;

/// Delivers out-of-band notifications to the site administrator.
pub trait Notifier: Send + Sync {
    /// Queue a notification for delivery. Returns immediately.
    fn dispatch(&self, subject: &str, body: &str);
}

/// Posts notifications to an HTTP mail relay.
#[derive(Debug, Clone)]
pub struct MailRelayNotifier {
    api_url: String,
    admin_email: String,
    http: Client,
}

impl MailRelayNotifier {
    pub fn is_configured() -> bool {
        env::var("MAIL_API_URL").map_or(false, |v| !v.is_empty())
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        let api_url = env::var("MAIL_API_URL")
            .map_err(|_| ProviderError::MissingConfig("MAIL_API_URL".to_string()))?;
        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@local".to_string());

        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_url,
            admin_email,
            http,
        })
    }
}

impl Notifier for MailRelayNotifier {
    fn dispatch(&self, subject: &str, body: &str) {
        let payload = json!({
            "to": self.admin_email,
            "subject": subject,
            "text": body,
        });
        let http = self.http.clone();
        let api_url = self.api_url.clone();
        let subject = subject.to_string();

        tokio::spawn(async move {
            match http.post(&api_url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(subject, "admin notification delivered");
                }
                Ok(response) => {
                    tracing::warn!(subject, status = %response.status(), "admin notification rejected by relay");
                }
                Err(e) => {
                    tracing::warn!(subject, error = %e, "admin notification failed");
                }
            }
        });
    }
}

/// Drops notifications. Used when no relay is configured.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn dispatch(&self, subject: &str, _body: &str) {
        tracing::debug!(subject, "no mail relay configured; notification dropped");
    }
}
