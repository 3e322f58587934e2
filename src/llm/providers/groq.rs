// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Groq API provider implementation
//!
//! Implements [`GenerationClient`] and [`ModelLister`] against Groq's
//! OpenAI-compatible API (`/chat/completions` and `/models`).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, GroqberryError, Result};
use crate::llm::provider::{
    CompletionRequest, CompletionResponse, Credential, GenerationClient, ModelLister, StopReason,
    Usage,
};

use super::common::{parse_numeric_token_counts, parse_retry_after_seconds, transport_error};

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

/// Groq provider
pub struct GroqProvider {
    client: Client,
    base_url: String,
}

impl Default for GroqProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GroqProvider {
    /// Create a new Groq provider
    pub fn new() -> Self {
        Self::with_base_url(GROQ_API_URL)
    }

    /// Create with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    /// Build the request body
    fn build_request(&self, request: &CompletionRequest) -> GroqRequest {
        GroqRequest {
            model: request.model.clone(),
            messages: vec![GroqMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }

    /// Parse an error response
    fn parse_error(&self, status: u16, body: &str, retry_after: Option<u64>) -> ApiError {
        if status == 401 {
            return ApiError::AuthenticationFailed;
        }

        let Ok(error_response) = serde_json::from_str::<GroqError>(body) else {
            return ApiError::ServerError {
                status,
                message: body.to_string(),
            };
        };

        let message = error_response.error.message;
        let code = error_response
            .error
            .code
            .or(error_response.error.error_type)
            .unwrap_or_default();

        match code.as_str() {
            "invalid_api_key" | "authentication_error" => ApiError::AuthenticationFailed,
            "rate_limit_exceeded" => {
                ApiError::RateLimited(retry_after.unwrap_or(60).min(u32::MAX as u64) as u32)
            }
            "context_length_exceeded" => {
                let (current, limit) = parse_numeric_token_counts(&message);
                ApiError::ContextTooLong { current, limit }
            }
            "model_not_found" | "model_decommissioned" => ApiError::ModelNotFound(message),
            _ if status == 429 => {
                ApiError::RateLimited(retry_after.unwrap_or(60).min(u32::MAX as u64) as u32)
            }
            _ => ApiError::ServerError { status, message },
        }
    }
}

#[async_trait]
impl GenerationClient for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(
        &self,
        credential: &Credential,
        request: CompletionRequest,
    ) -> Result<CompletionResponse> {
        let body = self.build_request(&request);

        tracing::debug!(
            target: "groqberry.llm.groq",
            model = %request.model,
            max_tokens = ?request.max_tokens,
            prompt_chars = request.prompt.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            let retry_after = parse_retry_after_seconds(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status, &body, retry_after).into());
        }

        let api_response: GroqResponse = response.json().await.map_err(transport_error)?;

        let choice = api_response.choices.into_iter().next().ok_or_else(|| {
            GroqberryError::Provider(ApiError::InvalidResponse(
                "No choices in response".to_string(),
            ))
        })?;

        let stop_reason = choice.finish_reason.as_deref().map(|r| match r {
            "length" => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        });

        let usage = api_response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: api_response.id,
            model: api_response.model,
            text: choice.message.content.unwrap_or_default(),
            stop_reason,
            usage,
        })
    }
}

#[async_trait]
impl ModelLister for GroqProvider {
    async fn list_models(&self, credential: &Credential) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.models_url())
            .bearer_auth(credential.expose())
            .send()
            .await
            .map_err(|e| GroqberryError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = self.parse_error(status, &body, None);
            return Err(GroqberryError::Network(format!(
                "failed to list models: {}",
                detail
            )));
        }

        let listing: GroqModelList = response
            .json()
            .await
            .map_err(|e| GroqberryError::Network(format!("malformed model list: {}", e)))?;

        Ok(listing.data.into_iter().map(|m| m.id).collect())
    }
}

// Groq API types (OpenAI-compatible format)

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    id: String,
    model: String,
    choices: Vec<GroqChoice>,
    usage: Option<GroqUsage>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GroqModelList {
    data: Vec<GroqModel>,
}

#[derive(Debug, Deserialize)]
struct GroqModel {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GroqErrorDetail {
    message: String,
    code: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
}
