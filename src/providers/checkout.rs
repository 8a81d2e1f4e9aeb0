// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Stripe Checkout integration for the premium upgrade.
//!
//! Creates a hosted checkout session for a fixed one-time product and
//! returns the session URL for the client to redirect to. Session metadata
//! carries the user id so fulfilment can attribute the payment.

use std::{env, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::ProviderError;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_PRICE_CENTS: u32 = 500;
const PRODUCT_NAME: &str = "Adipotech Premium";
const CURRENCY: &str = "usd";

/// Creates hosted checkout sessions for the premium product.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a checkout session for `user_id` and return its redirect URL.
    async fn create_checkout_session(&self, user_id: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct StripeCheckout {
    api_base_url: String,
    secret_key: String,
    frontend_url: String,
    price_cents: u32,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct CheckoutSessionResponse {
    url: Option<String>,
}

impl StripeCheckout {
    pub fn is_configured() -> bool {
        env::var("STRIPE_SECRET_KEY").map_or(false, |v| !v.is_empty())
    }

    pub fn from_env(frontend_url: &str) -> Result<Self, ProviderError> {
        let secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| ProviderError::MissingConfig("STRIPE_SECRET_KEY".to_string()))?;
        let api_base_url =
            env::var("STRIPE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let price_cents = env::var("PREMIUM_PRICE_CENTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PRICE_CENTS);

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url,
            secret_key,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            price_cents,
            http,
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeCheckout {
    async fn create_checkout_session(&self, user_id: &str) -> Result<String, ProviderError> {
        let success_url = format!("{}/?payment=success", self.frontend_url);
        let cancel_url = format!("{}/?payment=cancel", self.frontend_url);
        let price = self.price_cents.to_string();

        // Stripe takes form-encoded bodies with bracketed array keys.
        let form: Vec<(&str, &str)> = vec![
            ("mode", "payment"),
            ("payment_method_types[0]", "card"),
            ("line_items[0][price_data][currency]", CURRENCY),
            ("line_items[0][price_data][product_data][name]", PRODUCT_NAME),
            ("line_items[0][price_data][unit_amount]", &price),
            ("line_items[0][quantity]", "1"),
            ("metadata[user_id]", user_id),
            ("success_url", &success_url),
            ("cancel_url", &cancel_url),
        ];

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_base_url))
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Request(format!("checkout session request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body, "checkout session creation rejected");
            return Err(ProviderError::Upstream(format!(
                "checkout session creation failed with status {status}"
            )));
        }

        let session: CheckoutSessionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid session body: {e}")))?;

        session.url.ok_or_else(|| {
            ProviderError::InvalidResponse("session response carried no url".to_string())
        })
    }
}
