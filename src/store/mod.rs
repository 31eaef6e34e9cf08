//! Persistence backends for budget items and user accounts.
//!
//! Every backend provides the same capability set: a unique-constrained
//! insert, lookup by a unique field and a full listing. The uniqueness
//! guarantee lives here, not in the processors; their pre-checks only exist
//! to produce a friendlier error before the insert is attempted.

pub mod collections;
pub mod json_file;
pub mod memory;
pub mod postgres;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::budget::db_types::{BudgetEntryRecord, CreateBudgetEntry};
use crate::users::db_types::{CreateUserAccount, UserAccountRecord};

/// Field protected by a store-level unique constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    BudgetTitle,
    Username,
    Email,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueField::BudgetTitle => write!(f, "budget title"),
            UniqueField::Username => write!(f, "username"),
            UniqueField::Email => write!(f, "email"),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint violated on {0}")]
    Duplicate(UniqueField),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store query failed: {0}")]
    Query(String),

    #[error("store data is corrupt: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Unique field a user account can be looked up by
#[derive(Debug, Clone, Copy)]
pub enum UserLookup<'a> {
    Username(&'a str),
    Email(&'a str),
}

#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Insert a new entry, failing with `Duplicate(BudgetTitle)` when the title is taken.
    async fn insert_budget(&self, entry: CreateBudgetEntry) -> StoreResult<BudgetEntryRecord>;

    async fn find_budget_by_title(&self, title: &str) -> StoreResult<Option<BudgetEntryRecord>>;

    /// All entries, oldest first.
    async fn list_budgets(&self) -> StoreResult<Vec<BudgetEntryRecord>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account, failing with `Duplicate(Username)` or `Duplicate(Email)`.
    async fn insert_user(&self, user: CreateUserAccount) -> StoreResult<UserAccountRecord>;

    async fn find_user(&self, lookup: UserLookup<'_>) -> StoreResult<Option<UserAccountRecord>>;

    /// All accounts, oldest first.
    async fn list_users(&self) -> StoreResult<Vec<UserAccountRecord>>;
}

/// Full capability set shared by every backend.
pub trait Store: BudgetStore + UserStore {
    fn backend_name(&self) -> &'static str;
}

/// Bound a store call so a stalled backend surfaces as a retryable error.
///
/// Only the wait is bounded. Backends finish a write they already started,
/// so a timed-out insert may still have been stored.
pub async fn timed<T, F>(limit: Duration, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}
