// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Prompt construction
//!
//! Turns the conversation so far plus the new message into the literal
//! text sent to the model. Pure: the log is only read.

use crate::llm::message::ConversationLog;

const COT_PREFIX: &str = "Solve the following problem step by step, showing your reasoning:\n\n";
const COT_SUFFIX: &str = "\n\nSolution:";

/// How a turn should be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// One direct completion
    #[default]
    Plain,
    /// Step-by-step reasoning
    ChainOfThought,
}

impl GenerationMode {
    pub fn from_flag(cot: bool) -> Self {
        if cot {
            GenerationMode::ChainOfThought
        } else {
            GenerationMode::Plain
        }
    }

    pub fn is_cot(&self) -> bool {
        matches!(self, GenerationMode::ChainOfThought)
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::Plain => write!(f, "plain"),
            GenerationMode::ChainOfThought => write!(f, "chain-of-thought"),
        }
    }
}

/// Builds request text from history and the new message
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    include_history_in_plain: bool,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            include_history_in_plain: true,
        }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// When false, plain prompts carry the new message alone.
    pub fn with_history_in_plain(mut self, include: bool) -> Self {
        self.include_history_in_plain = include;
        self
    }

    /// Build the prompt for `new_message` given the turns already in `log`.
    pub fn build(&self, log: &ConversationLog, new_message: &str, mode: GenerationMode) -> String {
        match mode {
            GenerationMode::Plain if !self.include_history_in_plain => new_message.to_string(),
            GenerationMode::Plain => body(log, new_message),
            GenerationMode::ChainOfThought => {
                format!("{COT_PREFIX}{}{COT_SUFFIX}", body(log, new_message))
            }
        }
    }
}

fn body(log: &ConversationLog, new_message: &str) -> String {
    if log.is_empty() {
        new_message.to_string()
    } else {
        format!("{}\n{}", log.render(), new_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::message::Turn;

    fn two_turn_log() -> ConversationLog {
        let mut log = ConversationLog::new();
        log.push(Turn::user("2+2?"));
        log.push(Turn::assistant("4"));
        log
    }

    #[test]
    fn test_plain_empty_history() {
        let prompt = PromptBuilder::new().build(&ConversationLog::new(), "Hi", GenerationMode::Plain);
        assert_eq!(prompt, "Hi");
    }

    #[test]
    fn test_plain_with_history() {
        let prompt = PromptBuilder::new().build(&two_turn_log(), "and 3+3?", GenerationMode::Plain);
        assert_eq!(prompt, "user: 2+2?\nassistant: 4\nand 3+3?");
    }

    #[test]
    fn test_plain_without_history_toggle() {
        let builder = PromptBuilder::new().with_history_in_plain(false);
        let prompt = builder.build(&two_turn_log(), "and 3+3?", GenerationMode::Plain);
        assert_eq!(prompt, "and 3+3?");
    }

    #[test]
    fn test_cot_empty_history() {
        let prompt =
            PromptBuilder::new().build(&ConversationLog::new(), "2+2?", GenerationMode::ChainOfThought);
        assert_eq!(
            prompt,
            "Solve the following problem step by step, showing your reasoning:\n\n2+2?\n\nSolution:"
        );
    }

    #[test]
    fn test_cot_with_history() {
        let prompt =
            PromptBuilder::new().build(&two_turn_log(), "why?", GenerationMode::ChainOfThought);
        assert!(prompt.contains("user: 2+2?\nassistant: 4\nwhy?"));
        assert!(prompt.ends_with("\n\nSolution:"));
    }

    #[test]
    fn test_cot_ignores_history_toggle() {
        let builder = PromptBuilder::new().with_history_in_plain(false);
        let prompt = builder.build(&two_turn_log(), "why?", GenerationMode::ChainOfThought);
        assert!(prompt.contains("assistant: 4"));
    }

    #[test]
    fn test_plain_never_contains_template() {
        let prompt = PromptBuilder::new().build(&two_turn_log(), "x", GenerationMode::Plain);
        assert!(!prompt.contains("step by step"));
        assert!(!prompt.contains("Solution:"));
    }

    #[test]
    fn test_build_does_not_mutate_log() {
        let log = two_turn_log();
        let before = log.render();

        for mode in [GenerationMode::Plain, GenerationMode::ChainOfThought] {
            let _ = PromptBuilder::new().build(&log, "x", mode);
        }

        assert_eq!(log.len(), 2);
        assert_eq!(log.render(), before);
    }

    #[test]
    fn test_build_is_deterministic() {
        let log = two_turn_log();
        let builder = PromptBuilder::new();

        for mode in [GenerationMode::Plain, GenerationMode::ChainOfThought] {
            let first = builder.build(&log, "and 3+3?", mode);
            let second = builder.build(&log, "and 3+3?", mode);
            assert_eq!(first, second, "{} prompt changed between calls", mode);
        }
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(GenerationMode::from_flag(true), GenerationMode::ChainOfThought);
        assert_eq!(GenerationMode::from_flag(false), GenerationMode::Plain);
        assert!(GenerationMode::ChainOfThought.is_cot());
    }
}
