//! Interactive prompts for values that were not supplied any other way.

use std::io::IsTerminal;

use dialoguer::{Input, Password};

use crate::CliError;

/// Both stdin and stdout are attached to a terminal.
pub(crate) fn is_interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

fn require_interactive(what: &str) -> Result<(), CliError> {
    if is_interactive_terminal() {
        Ok(())
    } else {
        Err(CliError::prompt(format!(
            "{what} is required but stdin is not a terminal"
        )))
    }
}

/// Ask for a Backloggery username.
pub(crate) fn prompt_username() -> Result<String, CliError> {
    require_interactive("A Backloggery username (--username or BACKLOGGERY_USERNAME)")?;
    Input::<String>::new()
        .with_prompt("Backloggery username")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("username cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map(|s| s.trim().to_string())
        .map_err(|e| CliError::prompt(e.to_string()))
}

/// Ask for a Backloggery password without echoing it. The caller wraps the
/// result in [`Credentials`](shelf_sync_scraper::Credentials) straight away.
pub(crate) fn prompt_password(username: &str) -> Result<String, CliError> {
    require_interactive("A Backloggery password (BACKLOGGERY_PASSWORD)")?;
    Password::new()
        .with_prompt(format!("Backloggery password for {username}"))
        .interact()
        .map_err(|e| CliError::prompt(e.to_string()))
}

/// Text prompt with a pre-filled default; empty input keeps the default.
pub(crate) fn prompt_with_default(prompt: &str, default: &str) -> Result<String, CliError> {
    Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()
        .map(|s| s.trim().to_string())
        .map_err(|e| CliError::prompt(e.to_string()))
}

/// Optional text prompt; empty input means "unset".
pub(crate) fn prompt_optional(
    prompt: &str,
    current: Option<&str>,
) -> Result<Option<String>, CliError> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(c) = current {
        input = input.default(c.to_string());
    }
    let value = input
        .interact_text()
        .map_err(|e| CliError::prompt(e.to_string()))?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}
