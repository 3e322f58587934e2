// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::json;

use groqberry::chat::commands::{format_help_text, format_history, format_models};
use groqberry::chat::{parse_command, ChatCommand, ChatSession, GenerationMode};
use groqberry::cli::{AskArgs, ChatArgs, ModelsArgs, OutputFormat};
use groqberry::config::Settings;
use groqberry::error::Result;

use super::chat_ui::{
    print_error, print_notice, print_progress, print_response, print_welcome, read_user_input,
};
use super::runtime::build_session;

/// Interactive chat loop
pub(super) async fn run_chat(args: ChatArgs, settings: Settings) -> Result<()> {
    let mut session = build_session(settings, args.model.clone(), args.api_key)?;
    let mut mode = GenerationMode::from_flag(args.cot);

    if session.has_credential() {
        load_catalog(&mut session, args.model.as_deref()).await?;
    }

    print_welcome(&session.selected_model(), mode, session.has_credential())?;

    loop {
        let Some(line) = read_user_input(mode)? else {
            break;
        };

        match parse_command(&line) {
            ChatCommand::Empty => continue,
            ChatCommand::Exit => break,
            ChatCommand::Help => println!("{}\n", format_help_text()),
            ChatCommand::ToggleCot => {
                mode = GenerationMode::from_flag(!mode.is_cot());
                print_notice(&format!("mode: {}", mode))?;
            }
            ChatCommand::Model => {
                print_notice(&format!("model: {}", session.selected_model()))?;
            }
            ChatCommand::ModelSwitch(model) => match session.select_model(&model) {
                Ok(()) => print_notice(&format!("model: {}", session.selected_model()))?,
                Err(error) => print_error(&error),
            },
            ChatCommand::Models => {
                let refreshed = session.refresh_catalog().await.map(|_| ());
                match refreshed {
                    Ok(()) => println!(
                        "{}\n",
                        format_models(session.catalog().models(), &session.selected_model())
                    ),
                    Err(error) => print_error(&error),
                }
            }
            ChatCommand::Key(key) => {
                session.set_credential(key);
                if session.has_credential() {
                    print_notice("API key set")?;
                    if !session.catalog().is_loaded() {
                        load_catalog(&mut session, None).await?;
                    }
                } else {
                    print_notice("API key cleared")?;
                }
            }
            ChatCommand::History => println!("{}\n", format_history(session.log())),
            ChatCommand::Unknown(command) => {
                print_notice(&format!("Unknown command: {} (try /help)", command))?;
            }
            ChatCommand::Message(text) => {
                let result = session
                    .submit_with_progress(&text, mode, "", report_progress)
                    .await;
                match result {
                    Ok(answer) => print_response(&answer)?,
                    Err(error) => print_error(&error),
                }
            }
        }
    }

    Ok(())
}

/// Refresh the catalog, telling the user if a requested model was replaced.
/// A failed refresh is reported and the session carries on with the
/// fallback model.
async fn load_catalog(session: &mut ChatSession, requested: Option<&str>) -> Result<()> {
    let refreshed = session.refresh_catalog().await.map(|_| ());
    if let Err(error) = refreshed {
        print_error(&error);
        return Ok(());
    }

    if let Some(requested) = requested {
        let selected = session.selected_model();
        if selected != requested {
            print_notice(&format!(
                "Model {} is not available; using {}",
                requested, selected
            ))?;
        }
    }
    Ok(())
}

/// Answer a single prompt and print it
pub(super) async fn run_ask(args: AskArgs, settings: Settings, format: OutputFormat) -> Result<()> {
    let mut session = build_session(settings, None, args.api_key)?;
    let mode = GenerationMode::from_flag(args.cot);
    let requested = args.model.unwrap_or_default();
    let model = session.catalog().resolve(&requested);

    let show_progress = format == OutputFormat::Text;
    let answer = session
        .submit_with_progress(&args.prompt, mode, &model, |step| {
            if show_progress {
                report_progress(step);
            }
        })
        .await?;

    match format {
        OutputFormat::Text => println!("{}", answer),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ask_json(&model, mode, &answer))?)
        }
    }
    Ok(())
}

/// Refresh the catalog and print it
pub(super) async fn run_models(
    args: ModelsArgs,
    settings: Settings,
    format: OutputFormat,
) -> Result<()> {
    let mut session = build_session(settings, None, args.api_key)?;
    session.refresh_catalog().await?;

    let selected = session.selected_model();
    let models = session.catalog().models();

    match format {
        OutputFormat::Text => println!("{}", format_models(models, &selected)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&models_json(models, &selected))?)
        }
    }
    Ok(())
}

fn ask_json(model: &str, mode: GenerationMode, answer: &str) -> serde_json::Value {
    json!({
        "model": model,
        "mode": mode.to_string(),
        "answer": answer,
    })
}

/// Print a progress line, logging write failures instead of returning them.
fn report_progress(step: &str) {
    if let Err(error) = print_progress(step) {
        tracing::warn!(
            target: "groqberry.chat.session",
            error = %error,
            "failed to print progress"
        );
    }
}

fn models_json(models: &[String], selected: &str) -> serde_json::Value {
    json!({
        "models": models,
        "selected": selected,
    })
}
