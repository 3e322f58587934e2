// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for Groqberry.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Groqberry - chat with Groq-hosted models from your terminal
#[derive(Parser, Debug)]
#[command(name = "groqberry")]
#[command(version, about = "Chat with Groq-hosted models from your terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start interactive chat session (default when no command given)
    Chat(ChatArgs),

    /// Ask a single question (non-interactive)
    Ask(AskArgs),

    /// List the models the API currently offers
    Models(ModelsArgs),
}

/// Arguments for the chat subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ChatArgs {
    /// Model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Start in chain-of-thought mode
    #[arg(long)]
    pub cot: bool,

    /// API key (overrides the environment and settings file)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Arguments for the ask subcommand
#[derive(clap::Args, Debug)]
pub struct AskArgs {
    /// The question to ask
    pub prompt: String,

    /// Model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Answer with chain-of-thought reasoning
    #[arg(long)]
    pub cot: bool,

    /// API key (overrides the environment and settings file)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Arguments for the models subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ModelsArgs {
    /// API key (overrides the environment and settings file)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Output format for non-interactive commands
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
