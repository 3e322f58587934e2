// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Conversation turns
//!
//! The log is append-only: turns are never edited, removed or reordered
//! while a session lives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the turn author
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant response
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Unique identifier for the turn
    pub id: Uuid,

    /// Who wrote it
    pub role: Role,

    /// Text content
    pub content: String,

    /// When the turn was appended
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a new user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Render as a `"{role}: {content}"` prompt line.
    pub fn render(&self) -> String {
        format!("{}: {}", self.role, self.content)
    }
}

/// Ordered, append-only log of turns
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end of the log
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns in chronological order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Render every turn as a prompt line, joined by newlines.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(Turn::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a ConversationLog {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_user() {
        let turn = Turn::user("Hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "Hello");
    }

    #[test]
    fn test_turn_assistant() {
        let turn = Turn::assistant("Hi");
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.content, "Hi");
    }

    #[test]
    fn test_turn_ids_are_unique() {
        let a = Turn::user("same");
        let b = Turn::user("same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_turn_render() {
        assert_eq!(Turn::user("2+2?").render(), "user: 2+2?");
        assert_eq!(Turn::assistant("4").render(), "assistant: 4");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_log_push_preserves_order() {
        let mut log = ConversationLog::new();
        log.push(Turn::user("one"));
        log.push(Turn::assistant("two"));
        log.push(Turn::user("three"));

        let contents: Vec<&str> = log.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_log_render() {
        let mut log = ConversationLog::new();
        log.push(Turn::user("2+2?"));
        log.push(Turn::assistant("4"));

        assert_eq!(log.render(), "user: 2+2?\nassistant: 4");
    }

    #[test]
    fn test_empty_log_renders_empty() {
        let log = ConversationLog::new();
        assert!(log.is_empty());
        assert_eq!(log.render(), "");
    }
}
