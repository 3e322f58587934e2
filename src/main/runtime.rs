// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::sync::Arc;

use groqberry::agents::ResearchAgent;
use groqberry::chat::{ChatSession, ChatSessionBuilder};
use groqberry::config::Settings;
use groqberry::error::Result;
use groqberry::llm::providers::GroqProvider;

/// Wire the Groq backend and the research agent into a session.
///
/// `api_key` from the command line wins over the environment and the
/// settings file.
pub(super) fn build_session(
    settings: Settings,
    model: Option<String>,
    api_key: Option<String>,
) -> Result<ChatSession> {
    let groq = Arc::new(GroqProvider::with_base_url(&settings.provider.base_url));
    let agent = ResearchAgent::new(groq.clone())
        .with_max_tokens(settings.generation.cot_max_tokens);

    let api_key = api_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| settings.api_key());

    let mut builder = ChatSessionBuilder::new(settings)
        .with_generation_client(groq.clone())
        .with_model_lister(groq)
        .with_agent_runner(Arc::new(agent))
        .with_api_key(api_key);

    if let Some(model) = model {
        builder = builder.with_model(model);
    }

    builder.build()
}
