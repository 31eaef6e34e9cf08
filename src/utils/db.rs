use std::time::Duration;

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::store::{StoreError, StoreResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn build_pool(database_url: &str, max_size: u32, connection_timeout: Duration) -> StoreResult<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .connection_timeout(connection_timeout)
        .build(manager)
        .map_err(|e| StoreError::Unavailable(format!("failed to build connection pool: {}", e)))
}

pub fn get_conn(pool: &DbPool) -> StoreResult<DbConn> {
    pool.get()
        .map_err(|e| StoreError::Unavailable(format!("failed to check out connection: {}", e)))
}

pub fn run_migrations(conn: &mut PgConnection) -> StoreResult<usize> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Query(format!("failed to run migrations: {}", e)))?;

    Ok(applied.len())
}
