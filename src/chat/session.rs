// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat session management
//!
//! Encapsulates all state needed for a conversation: the credential, the
//! model catalog, the turn log and the backends a turn is sent to.

use std::sync::Arc;
use uuid::Uuid;

use crate::agents::AgentAggregator;
use crate::chat::prompt::{GenerationMode, PromptBuilder};
use crate::config::{CotStrategy, Settings};
use crate::error::{GroqberryError, Result};
use crate::llm::message::{ConversationLog, Turn};
use crate::llm::provider::{
    AgentRequest, AgentRunner, CompletionRequest, Credential, GenerationClient, ModelLister,
};
use crate::models::ModelCatalog;

/// Encapsulates all state for a chat session
pub struct ChatSession {
    /// Unique session identifier
    session_id: Uuid,

    /// Turns so far, oldest first
    log: ConversationLog,

    /// API key; every remote call is refused without one
    credential: Option<Credential>,

    /// Model list and current selection
    catalog: ModelCatalog,

    prompts: PromptBuilder,
    generation: Arc<dyn GenerationClient>,
    lister: Arc<dyn ModelLister>,
    agent: Arc<dyn AgentRunner>,

    /// Token ceiling for chain-of-thought turns
    cot_max_tokens: u32,

    /// Research rounds allowed per agent run
    agent_max_sources: u32,

    cot_strategy: CotStrategy,
}

/// Builder for creating ChatSession instances
pub struct ChatSessionBuilder {
    settings: Settings,
    generation: Option<Arc<dyn GenerationClient>>,
    lister: Option<Arc<dyn ModelLister>>,
    agent: Option<Arc<dyn AgentRunner>>,
    credential: Option<Credential>,
    model: Option<String>,
}

impl ChatSessionBuilder {
    /// Create a new builder with settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            generation: None,
            lister: None,
            agent: None,
            credential: None,
            model: None,
        }
    }

    /// Set the completion backend
    pub fn with_generation_client(mut self, client: Arc<dyn GenerationClient>) -> Self {
        self.generation = Some(client);
        self
    }

    /// Set the model catalog backend
    pub fn with_model_lister(mut self, lister: Arc<dyn ModelLister>) -> Self {
        self.lister = Some(lister);
        self
    }

    /// Set the agent backend used for chain-of-thought turns
    pub fn with_agent_runner(mut self, agent: Arc<dyn AgentRunner>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Use one backend for all three roles
    pub fn with_backend<B>(self, backend: Arc<B>) -> Self
    where
        B: GenerationClient + ModelLister + AgentRunner + 'static,
    {
        self.with_generation_client(backend.clone())
            .with_model_lister(backend.clone())
            .with_agent_runner(backend)
    }

    /// Set the API key. Blank keys are ignored.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.credential = key.and_then(Credential::new);
        self
    }

    /// Prefer this model over `provider.default_model`. It is checked against
    /// the catalog on the first refresh.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Build the ChatSession
    pub fn build(self) -> Result<ChatSession> {
        let generation = self
            .generation
            .ok_or_else(|| GroqberryError::Config("No generation client set".into()))?;
        let lister = self
            .lister
            .ok_or_else(|| GroqberryError::Config("No model lister set".into()))?;
        let agent = self
            .agent
            .ok_or_else(|| GroqberryError::Config("No agent runner set".into()))?;

        let initial_model = self
            .model
            .or_else(|| self.settings.provider.default_model.clone())
            .filter(|m| !m.trim().is_empty());
        let catalog = ModelCatalog::new(self.settings.catalog.fallback_model.clone(), initial_model);

        let generation_settings = &self.settings.generation;
        let prompts =
            PromptBuilder::new().with_history_in_plain(generation_settings.plain_includes_history);

        let session = ChatSession {
            session_id: Uuid::new_v4(),
            log: ConversationLog::new(),
            credential: self.credential,
            catalog,
            prompts,
            generation,
            lister,
            agent,
            cot_max_tokens: generation_settings.cot_max_tokens,
            agent_max_sources: generation_settings.agent_max_sources,
            cot_strategy: generation_settings.cot_strategy,
        };

        tracing::debug!(
            target: "groqberry.chat.session",
            session_id = %session.session_id,
            backend = session.generation.name(),
            has_credential = session.credential.is_some(),
            "session created"
        );

        Ok(session)
    }
}

impl ChatSession {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The conversation so far
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Replace the API key. Blank input clears it.
    pub fn set_credential(&mut self, key: impl Into<String>) {
        self.credential = Credential::new(key);
        tracing::debug!(
            target: "groqberry.chat.session",
            has_credential = self.credential.is_some(),
            "credential updated"
        );
    }

    pub fn clear_credential(&mut self) {
        self.credential = None;
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Re-fetch the model catalog
    pub async fn refresh_catalog(&mut self) -> Result<&[String]> {
        self.catalog
            .refresh(self.lister.as_ref(), self.credential.as_ref())
            .await
    }

    /// Choose the model used when a turn does not name one
    pub fn select_model(&mut self, model: &str) -> Result<()> {
        self.catalog.select(model)
    }

    /// Model a turn with no explicit model would use
    pub fn selected_model(&self) -> String {
        self.catalog.resolve("")
    }

    /// Send one message and return the answer.
    ///
    /// An empty `model` means the current selection.
    pub async fn submit(&mut self, text: &str, mode: GenerationMode, model: &str) -> Result<String> {
        self.submit_with_progress(text, mode, model, |_| {}).await
    }

    /// Like [`submit`](Self::submit), reporting agent research steps to
    /// `on_progress` as they arrive.
    ///
    /// The user turn is always recorded. On failure the rendered error is
    /// recorded as the assistant turn and the error is returned.
    pub async fn submit_with_progress<F>(
        &mut self,
        text: &str,
        mode: GenerationMode,
        model: &str,
        on_progress: F,
    ) -> Result<String>
    where
        F: FnMut(&str),
    {
        if text.trim().is_empty() {
            return Err(GroqberryError::InvalidInput(
                "message cannot be empty".to_string(),
            ));
        }

        let prompt = self.prompts.build(&self.log, text, mode);
        self.log.push(Turn::user(text));

        match self.generate(prompt, mode, model, on_progress).await {
            Ok(answer) => {
                self.log.push(Turn::assistant(answer.clone()));
                Ok(answer)
            }
            Err(error) => {
                tracing::warn!(
                    target: "groqberry.chat.session",
                    error = %error,
                    mode = %mode,
                    "turn failed"
                );
                self.log.push(Turn::assistant(error.user_message()));
                Err(error)
            }
        }
    }

    async fn generate<F>(
        &self,
        prompt: String,
        mode: GenerationMode,
        model: &str,
        on_progress: F,
    ) -> Result<String>
    where
        F: FnMut(&str),
    {
        let credential = self
            .credential
            .as_ref()
            .ok_or(GroqberryError::MissingCredential)?;
        let model = self.catalog.resolve(model);

        tracing::debug!(
            target: "groqberry.chat.session",
            model = %model,
            mode = %mode,
            strategy = ?self.cot_strategy,
            history_turns = self.log.len(),
            "submitting turn"
        );

        let answer = match (mode, self.cot_strategy) {
            (GenerationMode::Plain, _) => {
                let request = CompletionRequest::new(model, prompt);
                self.complete(credential, request).await?
            }
            (GenerationMode::ChainOfThought, CotStrategy::Single) => {
                let request =
                    CompletionRequest::new(model, prompt).with_max_tokens(self.cot_max_tokens);
                self.complete(credential, request).await?
            }
            (GenerationMode::ChainOfThought, CotStrategy::Agent) => {
                let request = AgentRequest {
                    prompt,
                    model,
                    max_sources: self.agent_max_sources,
                };
                let stream = self
                    .agent
                    .run_agent(credential, request)
                    .await
                    .map_err(GroqberryError::into_provider)?;
                let outcome = AgentAggregator::aggregate(stream, on_progress).await?;
                if outcome.is_empty() {
                    tracing::info!(
                        target: "groqberry.chat.session",
                        research_steps = outcome.research_steps,
                        "agent produced no response steps"
                    );
                }
                outcome.answer
            }
        };

        tracing::info!(
            target: "groqberry.chat.session",
            answer_chars = answer.len(),
            turns = self.log.len() + 1,
            "turn complete"
        );

        Ok(answer)
    }

    async fn complete(&self, credential: &Credential, request: CompletionRequest) -> Result<String> {
        let response = self
            .generation
            .complete(credential, request)
            .await
            .map_err(GroqberryError::into_provider)?;

        tracing::debug!(
            target: "groqberry.chat.session",
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "completion received"
        );
        Ok(response.text)
    }
}
