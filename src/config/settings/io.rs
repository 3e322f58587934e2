// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

use crate::error::Result;

use super::migration;
use super::Settings;

impl Settings {
    /// Get the default settings file path.
    pub fn default_path() -> PathBuf {
        Self::groqberry_home().join("settings.json")
    }

    /// Load settings from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let raw_value: serde_json::Value = serde_json::from_str(&content)?;
        let migrated = migration::migrate_on_load(raw_value);
        let settings: Settings = serde_json::from_value(migrated)?;
        settings.validate()?;

        tracing::debug!(
            target: "groqberry.config",
            path = %path.display(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// Write settings to `path`. Keys this version does not know about are
    /// kept from the existing file; an unreadable file is replaced.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let current = serde_json::to_value(self)?;
        let merged = match read_json(path) {
            Some(existing) => migration::deep_merge(existing, current),
            None => current,
        };

        std::fs::write(path, serde_json::to_string_pretty(&merged)?)?;
        tracing::debug!(
            target: "groqberry.config",
            path = %path.display(),
            "saved settings"
        );
        Ok(())
    }

    /// Get the groqberry home directory (~/.groqberry or $GROQBERRY_HOME).
    pub fn groqberry_home() -> PathBuf {
        if let Ok(home) = std::env::var("GROQBERRY_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".groqberry")
    }
}

fn read_json(path: &Path) -> Option<serde_json::Value> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}
