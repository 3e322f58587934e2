// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Research agent
//!
//! An [`AgentRunner`] built from plain completions. Each pulled step issues
//! one request: first up to `max_sources` research rounds, then one final
//! answer. Nothing is requested until the stream is polled.

use async_stream::try_stream;
use async_trait::async_trait;
use futures::Stream;
use std::sync::Arc;

use crate::error::Result;
use crate::llm::provider::{
    AgentRequest, AgentRunner, CompletionRequest, Credential, GenerationClient, StepEvent,
    StepStream,
};

/// Reply that ends the research phase early
pub const DONE_MARKER: &str = "DONE";

/// Multi-step research agent over a completion backend
#[derive(Clone)]
pub struct ResearchAgent {
    client: Arc<dyn GenerationClient>,
    max_tokens: Option<u32>,
}

impl ResearchAgent {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            max_tokens: None,
        }
    }

    /// Token ceiling applied to every step
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn request(&self, model: &str, prompt: String) -> CompletionRequest {
        let request = CompletionRequest::new(model, prompt);
        match self.max_tokens {
            Some(limit) => request.with_max_tokens(limit),
            None => request,
        }
    }
}

/// Prompt for one research round
pub fn research_prompt(task: &str, findings: &[String]) -> String {
    let notes = if findings.is_empty() {
        "(none yet)".to_string()
    } else {
        render_findings(findings)
    };
    format!(
        "You are researching the following request:\n\n{task}\n\n\
         Findings so far:\n{notes}\n\n\
         State one new, concise finding that helps answer the request. \
         If nothing useful remains, reply with {DONE_MARKER}."
    )
}

/// Prompt for the final answer
pub fn answer_prompt(task: &str, findings: &[String]) -> String {
    if findings.is_empty() {
        return task.to_string();
    }
    format!(
        "{task}\n\nResearch notes:\n{}\n\nUsing these notes, write the final answer.",
        render_findings(findings)
    )
}

fn render_findings(findings: &[String]) -> String {
    findings
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}. {}", i + 1, f))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_done(reply: &str) -> bool {
    let reply = reply.trim();
    reply.is_empty() || reply.eq_ignore_ascii_case(DONE_MARKER)
}

fn research_steps(
    agent: ResearchAgent,
    credential: Credential,
    request: AgentRequest,
) -> impl Stream<Item = Result<StepEvent>> + Send {
    try_stream! {
        let mut findings: Vec<String> = Vec::new();

        for round in 0..request.max_sources {
            let prompt = research_prompt(&request.prompt, &findings);
            let reply = agent
                .client
                .complete(&credential, agent.request(&request.model, prompt))
                .await?;

            if is_done(&reply.text) {
                tracing::debug!(target: "groqberry.agents", round, "research finished early");
                break;
            }

            let finding = reply.text.trim().to_string();
            findings.push(finding.clone());
            yield StepEvent::Research(finding);
        }

        let prompt = answer_prompt(&request.prompt, &findings);
        let reply = agent
            .client
            .complete(&credential, agent.request(&request.model, prompt))
            .await?;

        yield StepEvent::Response(reply.text);
    }
}

#[async_trait]
impl AgentRunner for ResearchAgent {
    async fn run_agent(
        &self,
        credential: &Credential,
        request: AgentRequest,
    ) -> Result<StepStream> {
        tracing::debug!(
            target: "groqberry.agents",
            backend = self.client.name(),
            model = %request.model,
            max_sources = request.max_sources,
            "starting research agent"
        );

        Ok(Box::pin(research_steps(
            self.clone(),
            credential.clone(),
            request,
        )))
    }
}
