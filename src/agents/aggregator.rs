// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Agent step aggregation
//!
//! Folds a [`StepStream`] into a single answer. Research steps only reach
//! the progress callback; response steps are concatenated with newlines.

use futures::StreamExt;

use crate::error::Result;
use crate::llm::provider::{StepEvent, StepStream};

/// Accumulator for agent step events
#[derive(Debug, Default)]
pub struct AgentAggregator {
    /// Response parts in arrival order
    response_parts: Vec<String>,
    /// Number of research steps seen
    research_steps: usize,
}

/// What a single step contributed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Progress text to surface to the user
    Progress(String),
    /// Text appended to the answer
    Appended,
}

/// Final result of an agent run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOutcome {
    /// Response parts joined with `\n`
    pub answer: String,
    /// Research events seen, each reported as progress
    pub research_steps: usize,
    /// Response events folded into `answer`
    pub response_steps: usize,
}

impl AgentOutcome {
    /// True when the agent produced no response steps at all
    pub fn is_empty(&self) -> bool {
        self.response_steps == 0
    }
}

impl AgentAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one step event
    pub fn process_event(&mut self, event: StepEvent) -> StepOutcome {
        match event {
            StepEvent::Research(content) => {
                self.research_steps += 1;
                StepOutcome::Progress(content)
            }
            StepEvent::Response(content) => {
                self.response_parts.push(content);
                StepOutcome::Appended
            }
        }
    }

    /// Response parts collected so far
    pub fn response_parts(&self) -> &[String] {
        &self.response_parts
    }

    /// Consume the accumulator and build the outcome
    pub fn finish(self) -> AgentOutcome {
        AgentOutcome {
            answer: self.response_parts.join("\n"),
            research_steps: self.research_steps,
            response_steps: self.response_parts.len(),
        }
    }

    /// Drain `stream` to completion, reporting research steps through
    /// `on_progress`. A failed step discards everything collected so far.
    pub async fn aggregate<F>(mut stream: StepStream, mut on_progress: F) -> Result<AgentOutcome>
    where
        F: FnMut(&str),
    {
        let mut aggregator = Self::new();

        while let Some(item) = stream.next().await {
            let event = match item {
                Ok(event) => event,
                Err(error) => {
                    tracing::warn!(
                        target: "groqberry.agents",
                        error = %error,
                        discarded_parts = aggregator.response_parts.len(),
                        "agent stream failed"
                    );
                    return Err(error.into_provider());
                }
            };

            if let StepOutcome::Progress(text) = aggregator.process_event(event) {
                tracing::debug!(
                    target: "groqberry.agents",
                    step = aggregator.research_steps,
                    "research step"
                );
                on_progress(&text);
            }
        }

        let outcome = aggregator.finish();
        tracing::debug!(
            target: "groqberry.agents",
            research_steps = outcome.research_steps,
            response_steps = outcome.response_steps,
            answer_chars = outcome.answer.len(),
            "agent run complete"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, GroqberryError};
    use futures::stream;
    use proptest::prelude::*;

    fn stream_of(items: Vec<Result<StepEvent>>) -> StepStream {
        Box::pin(stream::iter(items))
    }

    fn ok_stream(events: Vec<StepEvent>) -> StepStream {
        stream_of(events.into_iter().map(Ok).collect())
    }

    #[test]
    fn test_process_event_research() {
        let mut aggregator = AgentAggregator::new();
        let outcome = aggregator.process_event(StepEvent::Research("searching".into()));
        assert_eq!(outcome, StepOutcome::Progress("searching".into()));
        assert!(aggregator.response_parts().is_empty());
    }

    #[test]
    fn test_process_event_response() {
        let mut aggregator = AgentAggregator::new();
        let outcome = aggregator.process_event(StepEvent::Response("part".into()));
        assert_eq!(outcome, StepOutcome::Appended);
        assert_eq!(aggregator.response_parts(), &["part".to_string()]);
    }

    #[tokio::test]
    async fn test_aggregate_mixed_steps() {
        let stream = ok_stream(vec![
            StepEvent::Research("searching".into()),
            StepEvent::Response("step1".into()),
            StepEvent::Response("step2".into()),
        ]);

        let mut progress = Vec::new();
        let outcome = AgentAggregator::aggregate(stream, |p| progress.push(p.to_string()))
            .await
            .unwrap();

        assert_eq!(outcome.answer, "step1\nstep2");
        assert_eq!(outcome.research_steps, 1);
        assert_eq!(outcome.response_steps, 2);
        assert_eq!(progress, vec!["searching"]);
    }

    #[tokio::test]
    async fn test_aggregate_empty_stream() {
        let outcome = AgentAggregator::aggregate(ok_stream(vec![]), |_| {})
            .await
            .unwrap();
        assert_eq!(outcome.answer, "");
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_research_only_is_empty() {
        let stream = ok_stream(vec![
            StepEvent::Research("a".into()),
            StepEvent::Research("b".into()),
        ]);
        let mut count = 0;
        let outcome = AgentAggregator::aggregate(stream, |_| count += 1)
            .await
            .unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.answer, "");
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_aggregate_single_empty_response_is_not_empty() {
        let outcome =
            AgentAggregator::aggregate(ok_stream(vec![StepEvent::Response(String::new())]), |_| {})
                .await
                .unwrap();
        assert_eq!(outcome.answer, "");
        assert!(!outcome.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_mid_stream_failure() {
        let stream = stream_of(vec![
            Ok(StepEvent::Response("partial".into())),
            Err(GroqberryError::Provider(ApiError::StreamError(
                "connection reset".into(),
            ))),
            Ok(StepEvent::Response("never seen".into())),
        ]);

        let result = AgentAggregator::aggregate(stream, |_| {}).await;
        assert!(matches!(
            result,
            Err(GroqberryError::Provider(ApiError::StreamError(_)))
        ));
    }

    #[tokio::test]
    async fn test_aggregate_failure_is_normalised_to_provider() {
        let stream = stream_of(vec![Err(GroqberryError::Network("reset".into()))]);
        let result = AgentAggregator::aggregate(stream, |_| {}).await;
        assert!(matches!(
            result,
            Err(GroqberryError::Provider(ApiError::Network(_)))
        ));
    }

    fn step_strategy() -> impl Strategy<Value = StepEvent> {
        prop_oneof![
            "[a-z ]{0,8}".prop_map(StepEvent::Research),
            "[a-z ]{0,8}".prop_map(StepEvent::Response),
        ]
    }

    proptest! {
        #[test]
        fn prop_answer_is_responses_joined(events in prop::collection::vec(step_strategy(), 0..16)) {
            let expected_answer = events
                .iter()
                .filter_map(|e| match e {
                    StepEvent::Response(c) => Some(c.clone()),
                    StepEvent::Research(_) => None,
                })
                .collect::<Vec<_>>()
                .join("\n");
            let expected_progress: Vec<String> = events
                .iter()
                .filter_map(|e| match e {
                    StepEvent::Research(c) => Some(c.clone()),
                    StepEvent::Response(_) => None,
                })
                .collect();

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let mut progress = Vec::new();
            let outcome = runtime
                .block_on(AgentAggregator::aggregate(ok_stream(events), |p| {
                    progress.push(p.to_string())
                }))
                .unwrap();

            prop_assert_eq!(outcome.answer, expected_answer);
            prop_assert_eq!(progress, expected_progress);
        }
    }
}
