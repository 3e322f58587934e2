// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Multi-step agent support
//!
//! - [`ResearchAgent`] produces a stream of research and response steps
//! - [`AgentAggregator`] folds that stream into one answer

pub mod aggregator;
pub mod research;

pub use aggregator::{AgentAggregator, AgentOutcome, StepOutcome};
pub use research::ResearchAgent;
