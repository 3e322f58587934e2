// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for Groqberry
//!
//! Handles loading and saving settings from ~/.groqberry/settings.json.
//! Chat history is never written here; only provider and generation
//! preferences are.

use serde::{Deserialize, Serialize};

mod io;
mod migration;
mod validation;

/// Main settings structure, stored in ~/.groqberry/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Remote API configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Prompt and generation behaviour
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Model catalog behaviour
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (if stored directly, not recommended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name for API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model selected before the first catalog refresh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

/// How chain-of-thought turns are generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CotStrategy {
    /// Drive the multi-step research agent and aggregate its steps
    #[default]
    Agent,
    /// Send the chain-of-thought prompt as a single completion
    Single,
}

/// Prompt and generation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Token ceiling for chain-of-thought completions
    #[serde(default = "default_cot_max_tokens")]
    pub cot_max_tokens: u32,

    /// Whether plain prompts carry the rendered conversation history
    #[serde(default = "default_true")]
    pub plain_includes_history: bool,

    /// Upper bound on research steps per agent run
    #[serde(default = "default_agent_max_sources")]
    pub agent_max_sources: u32,

    /// Chain-of-thought generation strategy
    #[serde(default)]
    pub cot_strategy: CotStrategy,
}

/// Model catalog behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Model used when the fetched catalog is empty
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            default_model: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            cot_max_tokens: default_cot_max_tokens(),
            plain_includes_history: true,
            agent_max_sources: default_agent_max_sources(),
            cot_strategy: CotStrategy::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fallback_model: default_fallback_model(),
        }
    }
}

// Default value functions
fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_cot_max_tokens() -> u32 {
    4096
}

fn default_agent_max_sources() -> u32 {
    5
}

fn default_fallback_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_true() -> bool {
    true
}
