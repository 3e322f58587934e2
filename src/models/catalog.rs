// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model catalog
//!
//! Caches the model ids the API reports and keeps the current selection
//! valid against them. The catalog is only ever replaced wholesale.

use crate::error::{GroqberryError, Result};
use crate::llm::provider::{Credential, ModelLister};

/// Cached model list plus the current selection
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    /// Model ids in server order
    models: Vec<String>,
    /// Validated selection; empty until the first successful refresh
    selected: String,
    /// Unvalidated choice made before any catalog was loaded
    preferred: Option<String>,
    /// Used when the server reports no models at all
    fallback: String,
    /// Whether a refresh has succeeded at least once
    loaded: bool,
}

impl ModelCatalog {
    /// Create an empty catalog. `preferred` is honoured by [`resolve`] until
    /// the first refresh, which keeps it only if the server lists it.
    ///
    /// [`resolve`]: ModelCatalog::resolve
    pub fn new(fallback: impl Into<String>, preferred: Option<String>) -> Self {
        Self {
            models: Vec::new(),
            selected: String::new(),
            preferred: preferred.filter(|m| !m.trim().is_empty()),
            fallback: fallback.into(),
            loaded: false,
        }
    }

    /// Fetch the model list and replace the cache.
    ///
    /// On failure nothing changes and the error is reported as a network
    /// error. The call is never retried.
    pub async fn refresh(
        &mut self,
        lister: &dyn ModelLister,
        credential: Option<&Credential>,
    ) -> Result<&[String]> {
        let credential = credential.ok_or(GroqberryError::MissingCredential)?;

        let models = match lister.list_models(credential).await {
            Ok(models) => models,
            Err(error) => {
                let error = error.into_network();
                tracing::warn!(
                    target: "groqberry.models",
                    error = %error,
                    "model catalog refresh failed"
                );
                return Err(error);
            }
        };

        self.models = models;
        self.loaded = true;

        let preferred = self.preferred.take();
        if !self.contains(&self.selected) {
            let previous = std::mem::take(&mut self.selected);
            self.selected = preferred
                .filter(|m| self.contains(m))
                .or_else(|| self.models.first().cloned())
                .unwrap_or_else(|| self.fallback.clone());
            tracing::debug!(
                target: "groqberry.models",
                previous = %previous,
                selected = %self.selected,
                "selection repaired after refresh"
            );
        }

        tracing::debug!(
            target: "groqberry.models",
            count = self.models.len(),
            selected = %self.selected,
            "model catalog refreshed"
        );

        Ok(&self.models)
    }

    /// Select a model explicitly.
    ///
    /// Before the first refresh the id is kept as a preference and checked
    /// once the catalog arrives. Afterwards it must be one the server
    /// reported, or the fallback when the server reported none.
    pub fn select(&mut self, model: &str) -> Result<()> {
        let model = model.trim();
        if model.is_empty() {
            return Err(GroqberryError::InvalidInput(
                "model id cannot be empty".to_string(),
            ));
        }
        if !self.loaded {
            self.preferred = Some(model.to_string());
            tracing::debug!(target: "groqberry.models", preferred = model, "model preferred");
            return Ok(());
        }

        let allowed = if self.models.is_empty() {
            model == self.fallback
        } else {
            self.contains(model)
        };
        if !allowed {
            return Err(GroqberryError::UnknownModel(model.to_string()));
        }

        self.selected = model.to_string();
        tracing::debug!(target: "groqberry.models", selected = %self.selected, "model selected");
        Ok(())
    }

    /// The model a turn should use: `requested` when given, then the
    /// selection (or the preference before any refresh), then the fallback.
    pub fn resolve(&self, requested: &str) -> String {
        let requested = requested.trim();
        if !requested.is_empty() {
            requested.to_string()
        } else if !self.selected.is_empty() {
            self.selected.clone()
        } else if let Some(preferred) = &self.preferred {
            preferred.clone()
        } else {
            self.fallback.clone()
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    /// True once a refresh has succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
