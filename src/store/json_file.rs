use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::budget::db_types::{BudgetEntryRecord, CreateBudgetEntry};
use crate::users::db_types::{CreateUserAccount, UserAccountRecord};

use super::collections::Collections;
use super::{BudgetStore, Store, StoreError, StoreResult, UserLookup, UserStore};

/// Flat JSON document store.
///
/// The document is loaded once on open and rewritten in full after every
/// insert. Writes go to a sibling temp file that is then renamed over the
/// original, and the in-memory copy is only replaced once the rename
/// succeeded, so a failed write leaves both views unchanged.
///
/// Each insert runs on its own task. Once started it finishes even if the
/// caller stops waiting (a store timeout, a dropped request), so the file
/// and the in-memory copy never disagree.
#[derive(Clone)]
pub struct JsonFileStore {
    inner: Arc<Document>,
}

struct Document {
    path: PathBuf,
    state: Mutex<Collections>,
}

impl JsonFileStore {
    /// Open the document at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let collections = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str::<Collections>(&contents).map_err(|e| {
                StoreError::Corrupt(format!("failed to parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("{} not found, starting with an empty document", path.display());
                Collections::default()
            }
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        Ok(Self {
            inner: Arc::new(Document {
                path,
                state: Mutex::new(collections),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Apply `change` to a copy of the collections, persist the copy and
    /// only then swap it in. Runs detached from the caller's future.
    async fn commit<T, F>(&self, change: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Collections) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let document = self.inner.clone();

        tokio::spawn(async move {
            let mut state = document.state.lock().await;
            let mut next = state.clone();
            let result = change(&mut next)?;

            document.persist(&next).await?;
            *state = next;

            Ok::<T, StoreError>(result)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("document write task failed: {}", e)))?
    }
}

impl Document {
    async fn persist(&self, collections: &Collections) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(collections)
            .map_err(|e| StoreError::Query(format!("failed to serialize document: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await.map_err(|e| {
            StoreError::Unavailable(format!("failed to write {}: {}", tmp_path.display(), e))
        })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            StoreError::Unavailable(format!("failed to replace {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl BudgetStore for JsonFileStore {
    async fn insert_budget(&self, entry: CreateBudgetEntry) -> StoreResult<BudgetEntryRecord> {
        self.commit(move |collections| collections.insert_budget(entry))
            .await
    }

    async fn find_budget_by_title(&self, title: &str) -> StoreResult<Option<BudgetEntryRecord>> {
        Ok(self.inner.state.lock().await.find_budget_by_title(title))
    }

    async fn list_budgets(&self) -> StoreResult<Vec<BudgetEntryRecord>> {
        Ok(self.inner.state.lock().await.my_budget.clone())
    }
}

#[async_trait]
impl UserStore for JsonFileStore {
    async fn insert_user(&self, user: CreateUserAccount) -> StoreResult<UserAccountRecord> {
        self.commit(move |collections| collections.insert_user(user))
            .await
    }

    async fn find_user(&self, lookup: UserLookup<'_>) -> StoreResult<Option<UserAccountRecord>> {
        Ok(self.inner.state.lock().await.find_user(lookup))
    }

    async fn list_users(&self) -> StoreResult<Vec<UserAccountRecord>> {
        Ok(self.inner.state.lock().await.users.clone())
    }
}

impl Store for JsonFileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{UniqueField, timed};
    use std::time::Duration;
    use tempfile::TempDir;

    fn rent() -> CreateBudgetEntry {
        CreateBudgetEntry {
            title: "Rent".to_string(),
            amount: 604.0,
            color: "#4ECDC4".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_opens_empty() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let store = JsonFileStore::open(dir.path().join("budget-data.json")).await?;

        assert!(store.list_budgets().await?.is_empty());
        assert!(store.list_users().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_records_survive_reopen() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("budget-data.json");

        let store = JsonFileStore::open(&path).await?;
        let created = store.insert_budget(rent()).await?;
        drop(store);

        let reopened = JsonFileStore::open(&path).await?;
        let budgets = reopened.list_budgets().await?;
        assert_eq!(budgets, vec![created]);

        let err = reopened.insert_budget(rent()).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_reads_budget_only_documents() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("budget-data.json");
        std::fs::write(&path, r#"{ "myBudget": [] }"#)?;

        let store = JsonFileStore::open(&path).await?;
        assert!(store.list_users().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_file_is_corrupt() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("budget-data.json");
        std::fs::write(&path, "not json")?;

        let res = JsonFileStore::open(&path).await;
        assert!(matches!(res, Err(StoreError::Corrupt(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_untouched() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("missing-dir").join("budget-data.json");

        let store = JsonFileStore::open(&path).await?;
        let res = store.insert_budget(rent()).await;

        assert!(matches!(res, Err(StoreError::Unavailable(_))));
        assert!(store.list_budgets().await?.is_empty());
        Ok(())
    }

    fn entry(n: usize) -> CreateBudgetEntry {
        CreateBudgetEntry {
            title: format!("Category {}", n),
            amount: n as f64,
            color: "#45B7D1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_timed_out_inserts_keep_disk_and_memory_in_sync() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("budget-data.json");
        let store = JsonFileStore::open(&path).await?;

        let mut timed_out = Vec::new();
        for n in 0..60 {
            let limit = Duration::from_micros((n % 30) as u64);
            if let Err(StoreError::Timeout(_)) = timed(limit, store.insert_budget(entry(n))).await {
                timed_out.push(n);
            }
        }

        // Writes that outlived their caller still finish.
        tokio::time::sleep(Duration::from_millis(300)).await;

        let in_memory = store.list_budgets().await?;
        let on_disk = JsonFileStore::open(&path).await?.list_budgets().await?;
        assert_eq!(in_memory, on_disk);
        assert_eq!(in_memory.len(), 60);

        // A retry after a timeout sees the record that was written.
        for n in timed_out {
            let err = store.insert_budget(entry(n)).await.unwrap_err();
            assert!(matches!(err, StoreError::Duplicate(UniqueField::BudgetTitle)));
        }

        store.insert_budget(rent()).await?;
        let reopened = JsonFileStore::open(&path).await?.list_budgets().await?;
        assert_eq!(reopened.len(), 61);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_inserts_of_one_title() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("budget-data.json");
        let store = JsonFileStore::open(&path).await?;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.insert_budget(rent()).await }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await? {
                Ok(_) => created += 1,
                Err(StoreError::Duplicate(UniqueField::BudgetTitle)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        assert_eq!(created, 1);
        let reopened = JsonFileStore::open(&path).await?;
        assert_eq!(reopened.list_budgets().await?, store.list_budgets().await?);
        Ok(())
    }
}
