use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser, ValueEnum};
use dotenvy::dotenv;

use crate::store::Store;
use crate::store::json_file::JsonFileStore;
use crate::store::memory::MemoryStore;
use crate::store::postgres::PgStore;
use crate::users::config::PasswordSettings;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    Memory,
    File,
    Postgres,
}

/// Store and hashing settings, read from flags or the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "budget-back-end", about = "Personal budget API")]
pub struct AppSettings {
    #[clap(long, env, value_enum, default_value = "memory")]
    pub store_backend: StoreBackend,

    /// Required when the postgres backend is selected
    #[clap(long, env)]
    pub database_url: Option<String>,

    #[clap(long, env, default_value = "budget-data.json")]
    pub budget_data_path: PathBuf,

    #[clap(long, env, default_value_t = 5000)]
    pub store_timeout_ms: u64,

    #[clap(long, env, default_value_t = 10)]
    pub db_pool_size: u32,

    #[clap(long, env, default_value_t = true, action = ArgAction::Set)]
    pub run_migrations: bool,

    #[clap(long, env, default_value_t = false, action = ArgAction::Set)]
    pub seed_defaults: bool,

    #[clap(flatten)]
    pub password: PasswordSettings,
}

impl AppSettings {
    /// Settings from the environment only, ignoring process arguments.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();
        Ok(Self::try_parse_from(["budget-back-end"])?)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub store: Arc<dyn Store>,
    pub store_timeout: Duration,
    pub password: PasswordSettings,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("store", &self.store.backend_name())
            .field("store_timeout", &self.store_timeout)
            .field("password", &self.password)
            .finish()
    }
}

impl AppConfig {
    pub fn new(store: Arc<dyn Store>, store_timeout: Duration, password: PasswordSettings) -> Self {
        Self {
            store,
            store_timeout,
            password,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Duration::from_secs(5),
            PasswordSettings::default(),
        )
    }

    pub async fn from_settings(settings: &AppSettings) -> Result<Self> {
        let store: Arc<dyn Store> = match settings.store_backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::File => {
                let store = JsonFileStore::open(&settings.budget_data_path).await?;
                tracing::info!("Using JSON file store at {}", store.path().display());
                Arc::new(store)
            }
            StoreBackend::Postgres => {
                let database_url = settings
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("DATABASE_URL must be set when STORE_BACKEND=postgres"))?;

                let store = PgStore::connect(
                    database_url,
                    settings.db_pool_size,
                    settings.store_timeout(),
                )?;

                if settings.run_migrations {
                    let applied = store.migrate().await?;
                    tracing::info!("Applied {} pending migrations", applied);
                }

                Arc::new(store)
            }
        };

        Ok(Self::new(store, settings.store_timeout(), settings.password))
    }

    pub async fn from_env() -> Result<Self> {
        let settings = AppSettings::from_env()?;
        Self::from_settings(&settings).await
    }
}
