// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use clap::Parser;
use groqberry::cli::{Cli, Commands, OutputFormat};

#[test]
fn test_parse_no_command_defaults_to_chat() {
    let cli = Cli::try_parse_from(vec!["groqberry"]).expect("Valid command parsing");
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_chat_command() {
    let args = vec!["groqberry", "chat"];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    assert!(matches!(cli.command, Some(Commands::Chat(_))));
}

#[test]
fn test_parse_chat_with_model() {
    let args = vec!["groqberry", "chat", "-m", "llama3-70b-8192"];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    if let Some(Commands::Chat(chat_args)) = cli.command {
        assert_eq!(chat_args.model, Some("llama3-70b-8192".to_string()));
        assert!(!chat_args.cot);
    } else {
        panic!("Expected Chat command");
    }
}

#[test]
fn test_parse_chat_with_cot_and_key() {
    let args = vec!["groqberry", "chat", "--cot", "--api-key", "gsk-test"];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    if let Some(Commands::Chat(chat_args)) = cli.command {
        assert!(chat_args.cot);
        assert_eq!(chat_args.api_key, Some("gsk-test".to_string()));
    } else {
        panic!("Expected Chat command");
    }
}

#[test]
fn test_parse_ask_command() {
    let args = vec!["groqberry", "ask", "What is Rust?"];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    if let Some(Commands::Ask(ask_args)) = cli.command {
        assert_eq!(ask_args.prompt, "What is Rust?");
        assert!(!ask_args.cot);
        assert!(ask_args.model.is_none());
    } else {
        panic!("Expected Ask command");
    }
}

#[test]
fn test_parse_models_command() {
    let args = vec!["groqberry", "models"];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    assert!(matches!(cli.command, Some(Commands::Models(_))));
}

#[test]
fn test_parse_format_json() {
    let args = vec!["groqberry", "--format", "json", "ask", "hi"];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn test_parse_invalid_format() {
    let args = vec!["groqberry", "--format", "yaml", "models"];
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn test_parse_unknown_subcommand() {
    let args = vec!["groqberry", "train"];
    assert!(Cli::try_parse_from(args).is_err());
}
