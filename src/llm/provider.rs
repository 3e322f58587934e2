// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Remote service boundary
//!
//! The session talks to the outside world through three traits:
//! - [`GenerationClient`]: one prompt in, one completion out
//! - [`ModelLister`]: the catalog of usable model ids
//! - [`AgentRunner`]: a multi-step agent whose steps arrive as a stream
//!
//! Every call takes the session's [`Credential`] explicitly so the key can
//! change between turns without rebuilding the backend.

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

use crate::error::Result;

/// Opaque API key. Only its presence is meaningful to the session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key, treating blank input as no key at all.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Raw key, for the Authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Text generation backend
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Get the backend name (e.g., "groq", "mock")
    fn name(&self) -> &str;

    /// Single blocking completion
    async fn complete(
        &self,
        credential: &Credential,
        request: CompletionRequest,
    ) -> Result<CompletionResponse>;
}

/// Model catalog backend
#[async_trait]
pub trait ModelLister: Send + Sync {
    /// Model ids in server order
    async fn list_models(&self, credential: &Credential) -> Result<Vec<String>>;
}

/// Autonomous multi-step agent backend
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Start an agent run. Steps are produced lazily as the stream is polled;
    /// a run cannot be restarted, only started again.
    async fn run_agent(&self, credential: &Credential, request: AgentRequest)
        -> Result<StepStream>;
}

/// Lazily produced agent steps
pub type StepStream = Pin<Box<dyn Stream<Item = Result<StepEvent>> + Send>>;

/// One step reported by the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum StepEvent {
    /// Intermediate research; shown as progress, never part of the answer
    Research(String),
    /// A piece of the final answer
    Response(String),
}

/// Request for an agent run
#[derive(Debug, Clone)]
pub struct AgentRequest {
    /// Full prompt text
    pub prompt: String,

    /// Model to use for every step
    pub model: String,

    /// Upper bound on research steps
    pub max_sources: u32,
}

/// Request for completion
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model to use
    pub model: String,

    /// Prompt text, sent as a single user message
    pub prompt: String,

    /// Maximum tokens in response (provider default when `None`)
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    pub temperature: f32,
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Response ID
    pub id: String,

    /// Model used
    pub model: String,

    /// Generated text
    pub text: String,

    /// Stop reason
    pub stop_reason: Option<StopReason>,

    /// Token usage
    pub usage: Usage,
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of message
    EndTurn,
    /// Hit max tokens
    MaxTokens,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Input tokens
    pub input_tokens: u32,
    /// Output tokens
    pub output_tokens: u32,
}

impl CompletionRequest {
    /// Create a deterministic request: temperature 0, no token ceiling
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            max_tokens: None,
            temperature: 0.0,
        }
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
