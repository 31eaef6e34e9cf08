use serde::{Deserialize, Serialize};

use crate::budget::db_types::BudgetEntryRecord;

/// Success envelope: `{message, data}`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Error envelope: `{error, message}`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `GET /budget` mirrors the `myBudget` document of the JSON file store.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BudgetListResponse {
    #[serde(rename = "myBudget")]
    pub my_budget: Vec<BudgetEntryRecord>,
}
