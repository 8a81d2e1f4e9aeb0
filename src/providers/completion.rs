// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! OpenAI-compatible chat completion proxy.
//!
//! The server forwards either a single prompt or a full message history to
//! the upstream chat completions endpoint and returns the first choice's
//! text. The upstream key never reaches clients.

use std::{env, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::ProviderError;
use crate::models::ChatMessage;

const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 300;

/// Produces a completion for a chat transcript.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiCompletion {
    api_base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiCompletion {
    pub fn is_configured() -> bool {
        env::var("OPENAI_API_KEY").map_or(false, |v| !v.is_empty())
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ProviderError::MissingConfig("OPENAI_API_KEY".to_string()))?;
        let api_base_url =
            env::var("OPENAI_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_tokens = env::var("AI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url,
            api_key,
            model,
            max_tokens,
            http,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let payload = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
        });

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.api_base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Request(format!("completion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body, "completion request rejected");
            return Err(ProviderError::Upstream(format!(
                "completion failed with status {status}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid completion body: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::InvalidResponse("completion carried no choices".to_string())
            })
    }
}
