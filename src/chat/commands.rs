// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat command parsing
//!
//! Interprets a line typed at the interactive prompt as either a slash
//! command or a message for the model.

use crate::llm::message::ConversationLog;

/// Represents the different types of commands that can be issued in chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Exit the chat session
    Exit,
    /// Show help information
    Help,
    /// Toggle chain-of-thought mode
    ToggleCot,
    /// Show the current model
    Model,
    /// Switch to a different model
    ModelSwitch(String),
    /// Refresh and list the model catalog
    Models,
    /// Replace the API key (empty clears it)
    Key(String),
    /// Print the conversation so far
    History,
    /// Regular user message (not a command)
    Message(String),
    /// Empty input
    Empty,
    /// Unknown slash command
    Unknown(String),
}

/// Parse user input into a ChatCommand
pub fn parse_command(input: &str) -> ChatCommand {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return ChatCommand::Empty;
    }

    let lower = trimmed.to_lowercase();
    if lower == "exit" || lower == "quit" {
        return ChatCommand::Exit;
    }

    if !trimmed.starts_with('/') {
        return ChatCommand::Message(trimmed.to_string());
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, arg)) => (name.to_lowercase(), arg.trim()),
        None => (lower, ""),
    };

    match name.as_str() {
        "/quit" | "/exit" | "/q" => ChatCommand::Exit,
        "/help" | "/?" => ChatCommand::Help,
        "/cot" => ChatCommand::ToggleCot,
        "/model" if arg.is_empty() => ChatCommand::Model,
        "/model" => ChatCommand::ModelSwitch(arg.to_string()),
        "/models" => ChatCommand::Models,
        "/key" => ChatCommand::Key(arg.to_string()),
        "/history" => ChatCommand::History,
        _ => ChatCommand::Unknown(trimmed.to_string()),
    }
}

/// Format help text for display
pub fn format_help_text() -> String {
    r#"Groqberry Commands:

  /help         - Show this help message
  /cot          - Toggle chain-of-thought mode
  /model        - Show the current model
  /model <id>   - Switch to a different model
  /models       - Refresh and list available models
  /key <key>    - Set the API key (no argument clears it)
  /history      - Show the conversation so far
  /quit, exit   - Exit Groqberry"#
        .to_string()
}

/// Format the model list, marking the selection
pub fn format_models(models: &[String], selected: &str) -> String {
    if models.is_empty() {
        return format!("No models listed; using {}", selected);
    }

    models
        .iter()
        .map(|m| {
            if m == selected {
                format!("* {}", m)
            } else {
                format!("  {}", m)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the conversation for display
pub fn format_history(log: &ConversationLog) -> String {
    if log.is_empty() {
        return "(no messages yet)".to_string();
    }

    log.iter()
        .map(|turn| {
            format!(
                "[{}] {}",
                turn.timestamp.format("%H:%M:%S"),
                turn.render()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
