use crate::error::{AppError, AppResult, ValidationReason};

/// Trim a required text field, rejecting absent or blank values.
pub fn required_trimmed(value: Option<&str>, field_name: &str) -> AppResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::missing(field_name)),
    }
}

/// Blank optional fields are treated as absent.
pub fn optional_trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

pub fn validate_char_len(
    value: &str,
    min: usize,
    max: Option<usize>,
    reason: ValidationReason,
    message: &str,
) -> AppResult<()> {
    let len = value.chars().count();
    let too_long = max.is_some_and(|max| len > max);

    if len < min || too_long {
        return Err(AppError::validation(reason, message));
    }
    Ok(())
}
