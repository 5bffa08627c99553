// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the two stores

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::sqlite::{SqliteCalculationStorage, SqliteProjectStorage};
use crate::{CalculationStorage, ProjectStorage, StorageError, StorageResult};

/// Shared database state handed to the service layer
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub project_storage: Arc<dyn ProjectStorage>,
    pub calculation_storage: Arc<dyn CalculationStorage>,
}

impl DbState {
    /// Create new database state from an already migrated SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let project_storage = Arc::new(SqliteProjectStorage::new(pool.clone()));
        let calculation_storage = Arc::new(SqliteCalculationStorage::new(pool.clone()));

        Self {
            pool,
            project_storage,
            calculation_storage,
        }
    }

    /// Initialize database state backed by the SQLite file at `database_path`
    pub async fn init_with_path(
        database_path: PathBuf,
        max_connections: u32,
    ) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        debug!("Connecting to database: {}", database_path.display());

        let options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        Self::migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Initialize a private in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is pinned
    /// to a single connection that never expires.
    pub async fn in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(StorageError::Sqlx)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        Self::migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    async fn migrate(pool: &SqlitePool) -> StorageResult<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(StorageError::Migration)?;

        debug!("Database migrations completed");
        Ok(())
    }
}
