// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::io::{self, Write};

use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    ExecutableCommand,
};

use groqberry::chat::GenerationMode;
use groqberry::error::{GroqberryError, Result};

pub(super) fn print_welcome(model: &str, mode: GenerationMode, has_key: bool) -> Result<()> {
    let mut stdout = io::stdout();

    stdout.execute(SetForegroundColor(Color::Cyan))?;
    println!("Groqberry Chat");
    stdout.execute(ResetColor)?;
    println!("model: {}  mode: {}", model, mode);
    if !has_key {
        stdout.execute(SetForegroundColor(Color::Yellow))?;
        println!("No API key set. Use /key <key> or set GROQ_API_KEY.");
        stdout.execute(ResetColor)?;
    }
    println!("Type /help for commands.\n");
    Ok(())
}

/// Read one line. `None` on end of input.
pub(super) fn read_user_input(mode: GenerationMode) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Green))?;
    if mode.is_cot() {
        print!("you (cot): ");
    } else {
        print!("you: ");
    }
    stdout.execute(ResetColor)?;
    stdout.flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

pub(super) fn print_response(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Cyan))?;
    print!("assistant: ");
    stdout.execute(ResetColor)?;
    println!("{}\n", text);
    Ok(())
}

/// Agent research notice shown while a chain-of-thought turn runs
pub(super) fn print_progress(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::DarkGrey))?;
    println!("  researching: {}", text);
    stdout.execute(ResetColor)?;
    Ok(())
}

pub(super) fn print_notice(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Yellow))?;
    println!("{}", text);
    stdout.execute(ResetColor)?;
    Ok(())
}

/// Best effort; falls back to plain stderr if colouring fails.
pub(super) fn print_error(error: &GroqberryError) {
    let mut stderr = io::stderr();
    let _ = stderr.execute(SetForegroundColor(Color::Red));
    eprintln!("{}", error.user_message());
    let _ = stderr.execute(ResetColor);
}
