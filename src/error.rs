// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for Groqberry
//!
//! Every failure a turn can end in is one of three kinds: no credential,
//! a catalog transport failure, or a provider failure. The rest are
//! local (configuration, IO, bad input).

use thiserror::Error;

/// Main error type for Groqberry operations
#[derive(Error, Debug)]
pub enum GroqberryError {
    /// No API key is set for the session
    #[error("No API key provided")]
    MissingCredential,

    /// Model catalog could not be fetched
    #[error("Network error: {0}")]
    Network(String),

    /// Generation or agent call failed
    #[error("Provider error: {0}")]
    Provider(#[from] ApiError),

    /// Model is not part of the current catalog
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// API-specific error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Rate limited by the API
    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    /// Requested model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Context window exceeded
    #[error("Context too long: {current} tokens exceeds limit of {limit}")]
    ContextTooLong { current: u32, limit: u32 },

    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response from API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// API returned an error
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Agent step stream failed part-way
    #[error("Streaming error: {0}")]
    StreamError(String),
}

/// Result type alias for Groqberry operations
pub type Result<T> = std::result::Result<T, GroqberryError>;

impl GroqberryError {
    /// Text shown to the user in place of an assistant answer.
    pub fn user_message(&self) -> String {
        match self {
            GroqberryError::MissingCredential => "Error: No API key provided.".to_string(),
            other => format!("Error: {}", other),
        }
    }

    /// Normalise any failure from a catalog fetch into the network kind.
    pub(crate) fn into_network(self) -> Self {
        match self {
            GroqberryError::MissingCredential | GroqberryError::Network(_) => self,
            other => GroqberryError::Network(other.to_string()),
        }
    }

    /// Normalise any failure from a generation call into the provider kind.
    pub(crate) fn into_provider(self) -> Self {
        match self {
            GroqberryError::MissingCredential | GroqberryError::Provider(_) => self,
            GroqberryError::Network(message) => {
                GroqberryError::Provider(ApiError::Network(message))
            }
            other => GroqberryError::Provider(ApiError::StreamError(other.to_string())),
        }
    }
}
