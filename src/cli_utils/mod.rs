// Prompt and output helpers for budget-cli
pub mod formatting;
pub mod input;
pub mod menu;

pub use formatting::{format_record, format_table};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Yes/no question before touching the store
pub fn confirm(message: &str) -> CliResult<bool> {
    Ok(dialoguer::Confirm::new().with_prompt(message).interact()?)
}
