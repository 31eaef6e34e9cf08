use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::budget::db_types::{BudgetEntryRecord, CreateBudgetEntry};
use crate::users::db_types::{CreateUserAccount, UserAccountRecord};

use super::collections::Collections;
use super::{BudgetStore, Store, StoreError, StoreResult, UserLookup, UserStore};

/// Process-local store. Uniqueness is checked and the record inserted under
/// one lock, so concurrent duplicates cannot both succeed.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Collections>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn insert_budget(&self, entry: CreateBudgetEntry) -> StoreResult<BudgetEntryRecord> {
        self.lock()?.insert_budget(entry)
    }

    async fn find_budget_by_title(&self, title: &str) -> StoreResult<Option<BudgetEntryRecord>> {
        Ok(self.lock()?.find_budget_by_title(title))
    }

    async fn list_budgets(&self) -> StoreResult<Vec<BudgetEntryRecord>> {
        Ok(self.lock()?.my_budget.clone())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: CreateUserAccount) -> StoreResult<UserAccountRecord> {
        self.lock()?.insert_user(user)
    }

    async fn find_user(&self, lookup: UserLookup<'_>) -> StoreResult<Option<UserAccountRecord>> {
        Ok(self.lock()?.find_user(lookup))
    }

    async fn list_users(&self) -> StoreResult<Vec<UserAccountRecord>> {
        Ok(self.lock()?.users.clone())
    }
}

impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
