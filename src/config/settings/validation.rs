// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{GroqberryError, Result};

use super::Settings;

impl Settings {
    /// Get the API key, checking the env var first. Blank values count as unset.
    pub fn api_key(&self) -> Option<String> {
        // Priority: env var > config file.
        std::env::var(&self.provider.api_key_env)
            .ok()
            .or_else(|| self.provider.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }

    /// Reject values that would make every turn fail.
    pub fn validate(&self) -> Result<()> {
        if self.generation.cot_max_tokens == 0 {
            return Err(GroqberryError::Config(
                "generation.cot_max_tokens must be greater than zero".to_string(),
            ));
        }
        if self.generation.agent_max_sources == 0 {
            return Err(GroqberryError::Config(
                "generation.agent_max_sources must be greater than zero".to_string(),
            ));
        }
        if self.catalog.fallback_model.trim().is_empty() {
            return Err(GroqberryError::Config(
                "catalog.fallback_model must not be empty".to_string(),
            ));
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(GroqberryError::Config(
                "provider.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
