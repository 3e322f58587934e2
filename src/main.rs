// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Groqberry - chat with Groq-hosted models from your terminal
//!
//! Entry point for the Groqberry CLI application.

use clap::Parser;

use groqberry::cli::{ChatArgs, Cli, Commands};
use groqberry::config::Settings;
use groqberry::error::Result;

#[path = "main/chat_ui.rs"]
mod chat_ui;
#[path = "main/cli_commands.rs"]
mod cli_commands;
#[path = "main/runtime.rs"]
mod runtime;

use cli_commands::{run_ask, run_chat, run_models};

/// Targets raised to debug by `-v`
const VERBOSE_TARGETS: [&str; 5] = [
    "groqberry.chat.session=debug",
    "groqberry.agents=debug",
    "groqberry.models=debug",
    "groqberry.llm.groq=debug",
    "groqberry.config=debug",
];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(error) = run(cli).await {
        chat_ui::print_error(&error);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on session diagnostics without knowing target names.
    // `RUST_LOG` still applies.
    if verbose > 0 {
        for directive in VERBOSE_TARGETS {
            if let Ok(parsed) = directive.parse() {
                env_filter = env_filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Load settings
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    // Dispatch to appropriate command
    match cli.command {
        None => run_chat(ChatArgs::default(), settings).await,
        Some(Commands::Chat(args)) => run_chat(args, settings).await,
        Some(Commands::Ask(args)) => run_ask(args, settings, cli.format).await,
        Some(Commands::Models(args)) => run_models(args, settings, cli.format).await,
    }
}
