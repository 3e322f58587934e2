// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

pub mod commands;
pub mod prompt;
pub mod session;

pub use commands::{parse_command, ChatCommand};
pub use prompt::{GenerationMode, PromptBuilder};
pub use session::{ChatSession, ChatSessionBuilder};
