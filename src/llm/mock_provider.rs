// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock backend for testing
//!
//! Implements all three service traits with scripted replies so sessions
//! can be exercised without network access.

use async_trait::async_trait;
use futures::stream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ApiError, GroqberryError, Result};
use crate::llm::provider::{
    AgentRequest, AgentRunner, CompletionRequest, CompletionResponse, Credential,
    GenerationClient, ModelLister, StepEvent, StepStream, StopReason, Usage,
};

/// A mock backend for testing
#[derive(Clone)]
pub struct MockProvider {
    /// Provider name
    name: String,
    /// Scripted completion replies, returned in order (last one repeats)
    responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Scripted catalog reply
    models: Arc<Mutex<MockModels>>,
    /// Scripted agent run
    steps: Arc<Mutex<MockSteps>>,
    /// Completion call counter
    call_count: Arc<AtomicUsize>,
    /// Catalog call counter
    list_count: Arc<AtomicUsize>,
    /// Recorded completion requests
    recorded_requests: Arc<Mutex<Vec<CompletionRequest>>>,
    /// Recorded agent requests
    recorded_agent_requests: Arc<Mutex<Vec<AgentRequest>>>,
}

/// A pre-configured completion reply
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Succeed with this text
    Text(String),
    /// Fail with a server error carrying this message
    Error(String),
}

#[derive(Clone, Debug)]
enum MockModels {
    Listing(Vec<String>),
    Failure(String),
}

#[derive(Clone, Debug, Default)]
struct MockSteps {
    events: Vec<StepEvent>,
    /// Fail after yielding every scripted event
    trailing_error: Option<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock provider lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            responses: Arc::new(Mutex::new(vec![MockResponse::Text(
                "Mock response".to_string(),
            )])),
            models: Arc::new(Mutex::new(MockModels::Listing(vec![
                "mock-model".to_string()
            ]))),
            steps: Arc::new(Mutex::new(MockSteps::default())),
            call_count: Arc::new(AtomicUsize::new(0)),
            list_count: Arc::new(AtomicUsize::new(0)),
            recorded_requests: Arc::new(Mutex::new(vec![])),
            recorded_agent_requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Set the text response
    pub fn with_response(self, text: impl Into<String>) -> Self {
        *lock(&self.responses) = vec![MockResponse::Text(text.into())];
        self
    }

    /// Queue multiple responses (returned in order)
    pub fn with_responses(self, texts: Vec<String>) -> Self {
        *lock(&self.responses) = texts.into_iter().map(MockResponse::Text).collect();
        self
    }

    /// Make every completion fail
    pub fn with_error(self, message: impl Into<String>) -> Self {
        *lock(&self.responses) = vec![MockResponse::Error(message.into())];
        self
    }

    /// Set the catalog returned by `list_models`
    pub fn with_models(self, models: Vec<String>) -> Self {
        *lock(&self.models) = MockModels::Listing(models);
        self
    }

    /// Make `list_models` fail with a network error
    pub fn with_model_failure(self, message: impl Into<String>) -> Self {
        *lock(&self.models) = MockModels::Failure(message.into());
        self
    }

    /// Set the steps yielded by every agent run
    pub fn with_steps(self, events: Vec<StepEvent>) -> Self {
        *lock(&self.steps) = MockSteps {
            events,
            trailing_error: None,
        };
        self
    }

    /// Yield `events`, then fail the stream
    pub fn with_steps_then_error(self, events: Vec<StepEvent>, message: impl Into<String>) -> Self {
        *lock(&self.steps) = MockSteps {
            events,
            trailing_error: Some(message.into()),
        };
        self
    }

    /// Get the number of times complete() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times list_models() was called
    pub fn list_count(&self) -> usize {
        self.list_count.load(Ordering::SeqCst)
    }

    /// Get all recorded completion requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        lock(&self.recorded_requests).clone()
    }

    /// Get the last completion request made
    pub fn last_request(&self) -> Option<CompletionRequest> {
        lock(&self.recorded_requests).last().cloned()
    }

    /// Get all recorded agent requests
    pub fn recorded_agent_requests(&self) -> Vec<AgentRequest> {
        lock(&self.recorded_agent_requests).clone()
    }

    /// Get the next response
    fn next_response(&self) -> MockResponse {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        let responses = lock(&self.responses);
        // Cycle through responses or return the last one
        if responses.is_empty() {
            MockResponse::Text("Mock response".to_string())
        } else {
            responses[count.min(responses.len() - 1)].clone()
        }
    }
}

#[async_trait]
impl GenerationClient for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        _credential: &Credential,
        request: CompletionRequest,
    ) -> Result<CompletionResponse> {
        lock(&self.recorded_requests).push(request.clone());

        match self.next_response() {
            MockResponse::Text(text) => Ok(CompletionResponse {
                id: format!("msg_{}", uuid::Uuid::new_v4().simple()),
                model: request.model,
                text,
                stop_reason: Some(StopReason::EndTurn),
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
            }),
            MockResponse::Error(message) => Err(GroqberryError::Provider(ApiError::ServerError {
                status: 500,
                message,
            })),
        }
    }
}

#[async_trait]
impl ModelLister for MockProvider {
    async fn list_models(&self, _credential: &Credential) -> Result<Vec<String>> {
        self.list_count.fetch_add(1, Ordering::SeqCst);
        match &*lock(&self.models) {
            MockModels::Listing(models) => Ok(models.clone()),
            MockModels::Failure(message) => Err(GroqberryError::Network(message.clone())),
        }
    }
}

#[async_trait]
impl AgentRunner for MockProvider {
    async fn run_agent(
        &self,
        _credential: &Credential,
        request: AgentRequest,
    ) -> Result<StepStream> {
        lock(&self.recorded_agent_requests).push(request);

        let script = lock(&self.steps).clone();
        let mut items: Vec<Result<StepEvent>> = script.events.into_iter().map(Ok).collect();
        if let Some(message) = script.trailing_error {
            items.push(Err(GroqberryError::Provider(ApiError::StreamError(message))));
        }

        Ok(Box::pin(stream::iter(items)))
    }
}
