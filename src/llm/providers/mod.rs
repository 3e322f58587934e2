// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Remote API implementations

pub(crate) mod common;
pub mod groq;

pub use groq::GroqProvider;
