use crate::cli_utils::{CliError, CliResult};
use dialoguer::{Input as DialoguerInput, Password};

/// Input utilities
pub struct Input;

impl Input {
    /// Get a string from user input
    pub fn get_string(prompt: &str) -> CliResult<String> {
        Ok(DialoguerInput::new().with_prompt(prompt).interact_text()?)
    }

    /// Get an optional string, empty input meaning none
    pub fn get_optional_string(prompt: &str) -> CliResult<Option<String>> {
        let input: String = DialoguerInput::new()
            .with_prompt(format!("{} (optional)", prompt))
            .allow_empty(true)
            .interact_text()?;

        Ok(if input.trim().is_empty() { None } else { Some(input) })
    }

    /// Get a floating point amount
    pub fn get_f64(prompt: &str) -> CliResult<f64> {
        let input: String = DialoguerInput::new().with_prompt(prompt).interact_text()?;
        parse_f64(&input)
    }

    /// Read a password without echoing it
    pub fn get_password(prompt: &str) -> CliResult<String> {
        Ok(Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?)
    }
}

fn parse_f64(input: &str) -> CliResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| CliError::InvalidInput("Invalid number format".to_string()))
}
