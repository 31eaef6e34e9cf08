use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::schema::budget_items as BudgetItemsTable;

#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = BudgetItemsTable)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntryRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "budget")]
    pub amount: f64,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Already validated and canonicalized entry, ready for insertion
#[derive(Serialize, Deserialize, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = BudgetItemsTable)]
pub struct CreateBudgetEntry {
    pub title: String,
    pub amount: f64,
    pub color: String,
}
