use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::budget::db_types::{BudgetEntryRecord, CreateBudgetEntry};
use crate::schema::{budget_items as BudgetItems, user_accounts as UserAccounts};
use crate::users::db_types::{CreateUserAccount, UserAccountRecord};
use crate::utils::db::{DbPool, build_pool, get_conn, run_migrations};

use super::{BudgetStore, Store, StoreError, StoreResult, UniqueField, UserLookup, UserStore};

/// Relational store on a diesel r2d2 pool. Uniqueness is enforced by the
/// `UNIQUE` constraints declared in `migrations/`.
///
/// Queries run on the blocking pool and are not cancelled when the caller
/// gives up: an insert reported as a store timeout may still commit. The
/// database stays the single source of truth, so a retry of that insert
/// fails with `Duplicate` instead of writing a second row.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn connect(database_url: &str, max_size: u32, connection_timeout: Duration) -> StoreResult<Self> {
        let pool = build_pool(database_url, max_size, connection_timeout)?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> StoreResult<usize> {
        self.run_blocking(|conn| run_migrations(conn)).await
    }

    async fn run_blocking<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = get_conn(&pool)?;
            op(&mut *conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("blocking store task failed: {}", e)))?
    }

    async fn query<T, F>(&self, query: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run_blocking(move |conn| query(conn).map_err(map_diesel_error))
            .await
    }
}

fn unique_field_for(constraint: &str) -> Option<UniqueField> {
    match constraint {
        "budget_items_title_key" => Some(UniqueField::BudgetTitle),
        "user_accounts_username_key" => Some(UniqueField::Username),
        "user_accounts_email_key" => Some(UniqueField::Email),
        _ => None,
    }
}

pub(crate) fn map_diesel_error(error: DieselError) -> StoreError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            // Older servers omit the constraint name; it is still part of the message.
            let field = info.constraint_name().and_then(unique_field_for).or_else(|| {
                [
                    "budget_items_title_key",
                    "user_accounts_username_key",
                    "user_accounts_email_key",
                ]
                .into_iter()
                .find(|name| info.message().contains(name))
                .and_then(unique_field_for)
            });

            match field {
                Some(field) => StoreError::Duplicate(field),
                None => StoreError::Query(format!("unique violation: {}", info.message())),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            StoreError::Unavailable(info.message().to_string())
        }
        DieselError::DatabaseError(_, info) => StoreError::Query(info.message().to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

#[async_trait]
impl BudgetStore for PgStore {
    async fn insert_budget(&self, entry: CreateBudgetEntry) -> StoreResult<BudgetEntryRecord> {
        self.query(move |conn| {
            diesel::insert_into(BudgetItems::table)
                .values(&entry)
                .get_result::<BudgetEntryRecord>(conn)
        })
        .await
    }

    async fn find_budget_by_title(&self, wanted_title: &str) -> StoreResult<Option<BudgetEntryRecord>> {
        let wanted = wanted_title.to_string();
        self.query(move |conn| {
            use crate::schema::budget_items::dsl::*;

            budget_items
                .filter(title.eq(wanted))
                .first::<BudgetEntryRecord>(conn)
                .optional()
        })
        .await
    }

    async fn list_budgets(&self) -> StoreResult<Vec<BudgetEntryRecord>> {
        self.query(|conn| {
            use crate::schema::budget_items::dsl::*;

            budget_items
                .order((created_at.asc(), id.asc()))
                .load::<BudgetEntryRecord>(conn)
        })
        .await
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: CreateUserAccount) -> StoreResult<UserAccountRecord> {
        self.query(move |conn| {
            diesel::insert_into(UserAccounts::table)
                .values(&user)
                .get_result::<UserAccountRecord>(conn)
        })
        .await
    }

    async fn find_user(&self, lookup: UserLookup<'_>) -> StoreResult<Option<UserAccountRecord>> {
        use crate::schema::user_accounts::dsl::*;

        match lookup {
            UserLookup::Username(value) => {
                let wanted = value.to_string();
                self.query(move |conn| {
                    user_accounts
                        .filter(username.eq(wanted))
                        .first::<UserAccountRecord>(conn)
                        .optional()
                })
                .await
            }
            UserLookup::Email(value) => {
                let wanted = value.to_string();
                self.query(move |conn| {
                    user_accounts
                        .filter(email.eq(wanted))
                        .first::<UserAccountRecord>(conn)
                        .optional()
                })
                .await
            }
        }
    }

    async fn list_users(&self) -> StoreResult<Vec<UserAccountRecord>> {
        self.query(|conn| {
            use crate::schema::user_accounts::dsl::*;

            user_accounts
                .order((created_at.asc(), id.asc()))
                .load::<UserAccountRecord>(conn)
        })
        .await
    }
}

impl Store for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
