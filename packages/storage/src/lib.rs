// ABOUTME: Persistence layer for projects and calculations
// ABOUTME: Repository traits, the SQLite implementation and shared database state

use async_trait::async_trait;
use thiserror::Error;

use calculator_core::{Calculation, CalculationInput, Project, ProjectInput};

pub mod db;
pub mod sqlite;

pub use db::DbState;
pub use sqlite::{SqliteCalculationStorage, SqliteProjectStorage};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Project store. Projects are returned with their calculations loaded.
#[async_trait]
pub trait ProjectStorage: Send + Sync {
    async fn find_all(&self) -> StorageResult<Vec<Project>>;
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Project>>;
    async fn save(&self, input: ProjectInput) -> StorageResult<Project>;
    /// Replace a stored project. Fails with `NotFound` when the id is absent.
    async fn update(&self, id: i64, input: ProjectInput) -> StorageResult<Project>;
    /// Remove a project and, through the foreign key, its calculations.
    async fn delete_by_id(&self, id: i64) -> StorageResult<()>;
    async fn count(&self) -> StorageResult<i64>;
}

/// Calculation store with the two project-scoped finders
#[async_trait]
pub trait CalculationStorage: Send + Sync {
    async fn find_all(&self) -> StorageResult<Vec<Calculation>>;
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Calculation>>;
    async fn find_by_project_id(&self, project_id: i64) -> StorageResult<Vec<Calculation>>;
    async fn find_by_project_id_and_id(
        &self,
        project_id: i64,
        id: i64,
    ) -> StorageResult<Option<Calculation>>;
    async fn save(&self, input: CalculationInput) -> StorageResult<Calculation>;
    /// Replace description and expression. Any stored result is cleared.
    async fn update(&self, id: i64, input: CalculationInput) -> StorageResult<Calculation>;
    async fn save_result(&self, id: i64, result: Option<f64>) -> StorageResult<()>;
    async fn delete_by_id(&self, id: i64) -> StorageResult<()>;
    async fn count(&self) -> StorageResult<i64>;
}
