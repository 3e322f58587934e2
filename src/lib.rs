// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Groqberry - a chain-of-thought chat front-end for hosted LLM APIs.
//!
//! This crate exposes the runtime used by the `groqberry` CLI
//! (`src/main.rs`).
//!
//! Architecture highlights:
//! - `chat`: session state, prompt construction, per-turn orchestration
//! - `llm`: conversation types, remote service traits, the Groq backend
//! - `agents`: the research agent and the step aggregator
//! - `models`: model catalog and selection
//! - `config`: persisted settings

pub mod agents;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;

pub use error::{GroqberryError, Result};
