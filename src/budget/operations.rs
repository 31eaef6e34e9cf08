use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};

use crate::budget::db_types::{BudgetEntryRecord, CreateBudgetEntry};
use crate::budget::processor_enums::CreateBudgetInputArgs;
use crate::error::{AppError, AppResult, ConflictReason, ValidationReason};
use crate::store::timed;
use crate::utils::app_config::AppConfig;
use crate::utils::validation::required_trimmed;

// RGB or RGBA hex, 6 to 8 digits after the hash.
static COLOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6,8}$").expect("color pattern is valid"));

/// Accepts JSON numbers and numeric strings; anything else is not an amount.
pub fn parse_amount(value: Option<&Value>) -> AppResult<f64> {
    let amount = match value {
        None | Some(Value::Null) => return Err(AppError::missing("budget")),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(AppError::missing("budget")),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match amount {
        Some(a) if a.is_finite() && a >= 0.0 => Ok(a),
        Some(a) if a.is_finite() => Err(AppError::validation(
            ValidationReason::InvalidAmount,
            "Budget must be a positive number",
        )),
        _ => Err(AppError::validation(
            ValidationReason::InvalidAmount,
            "Budget must be a number",
        )),
    }
}

pub fn normalize_color(value: Option<&str>) -> AppResult<String> {
    let color = match value {
        Some(c) if !c.is_empty() => c,
        _ => return Err(AppError::missing("color")),
    };

    if !COLOR_PATTERN.is_match(color) {
        return Err(AppError::validation(
            ValidationReason::InvalidColor,
            "Color must be in hexadecimal format with at least 6 digits (e.g., #ED4523)",
        ));
    }

    Ok(color.to_uppercase())
}

/// Validate a create request in field order and canonicalize it.
pub fn validate_budget_input(args: &CreateBudgetInputArgs) -> AppResult<CreateBudgetEntry> {
    let title = required_trimmed(args.title.as_deref(), "title")?;
    let amount = parse_amount(args.budget.as_ref())?;
    let color = normalize_color(args.color.as_deref())?;

    Ok(CreateBudgetEntry {
        title,
        amount,
        color,
    })
}

pub async fn create_budget_entry(
    app_config: &AppConfig,
    args: &CreateBudgetInputArgs,
) -> AppResult<BudgetEntryRecord> {
    let entry = validate_budget_input(args)?;
    let store = app_config.store.clone();

    if timed(app_config.store_timeout, store.find_budget_by_title(&entry.title))
        .await?
        .is_some()
    {
        return Err(AppError::conflict(ConflictReason::DuplicateTitle));
    }

    let record = timed(app_config.store_timeout, store.insert_budget(entry)).await?;
    tracing::info!(id = %record.id, title = %record.title, "budget item created");

    Ok(record)
}

pub async fn list_budget_entries(app_config: &AppConfig) -> AppResult<Vec<BudgetEntryRecord>> {
    let records = timed(app_config.store_timeout, app_config.store.list_budgets()).await?;
    Ok(records)
}

pub fn default_budget_items() -> Vec<CreateBudgetInputArgs> {
    [
        ("Eat out", 52, "#FF6B6B"),
        ("Rent", 604, "#4ECDC4"),
        ("Grocery", 156, "#45B7D1"),
        ("Utilities", 174, "#96CEB4"),
        ("Transportation", 104, "#FFEAA7"),
        ("Entertainment", 87, "#DDA0DD"),
        ("Savings", 139, "#98D8C8"),
        ("Healthcare", 70, "#F7DC6F"),
        ("Education", 114, "#BB8FCE"),
    ]
    .into_iter()
    .map(|(title, budget, color)| CreateBudgetInputArgs {
        title: Some(title.to_string()),
        budget: Some(json!(budget)),
        color: Some(color.to_string()),
    })
    .collect()
}

/// Insert the default categories, skipping titles that already exist.
pub async fn seed_default_budget(app_config: &AppConfig) -> AppResult<Vec<BudgetEntryRecord>> {
    let mut inserted = Vec::new();

    for item in default_budget_items() {
        match create_budget_entry(app_config, &item).await {
            Ok(record) => inserted.push(record),
            Err(AppError::Conflict { .. }) => {
                tracing::debug!(title = ?item.title, "default budget item already present");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("Seeded {} default budget items", inserted.len());
    Ok(inserted)
}
