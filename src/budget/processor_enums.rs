use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::budget::db_types::BudgetEntryRecord;

/// Raw `POST /budget` body. Fields stay loose so each failure can be
/// reported with its own reason instead of a generic parse error.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateBudgetInputArgs {
    pub title: Option<String>,
    pub budget: Option<Value>,
    pub color: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum BudgetProcessorInput {
    CreateBudget(CreateBudgetInputArgs),
    GetBudgets,
    SeedDefaults,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum BudgetProcessorOutput {
    CreateBudget(BudgetEntryRecord),
    GetBudgets(Vec<BudgetEntryRecord>),
    SeedDefaults(Vec<BudgetEntryRecord>),
}
