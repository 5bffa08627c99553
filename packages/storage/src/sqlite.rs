// ABOUTME: SQLite implementations of the project and calculation stores
// ABOUTME: Plain runtime queries with explicit row mapping

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::debug;

use calculator_core::{Calculation, CalculationInput, Project, ProjectInput};

use crate::{CalculationStorage, ProjectStorage, StorageError, StorageResult};

const CALCULATION_COLUMNS: &str = "id, project_id, description, expression, result";

/// Convert a database row to a Calculation
fn row_to_calculation(row: &SqliteRow) -> StorageResult<Calculation> {
    Ok(Calculation {
        id: row.try_get("id").map_err(StorageError::Sqlx)?,
        project_id: row.try_get("project_id").map_err(StorageError::Sqlx)?,
        description: row.try_get("description").map_err(StorageError::Sqlx)?,
        expression: row.try_get("expression").map_err(StorageError::Sqlx)?,
        result: row.try_get("result").map_err(StorageError::Sqlx)?,
    })
}

pub struct SqliteProjectStorage {
    pool: SqlitePool,
}

impl SqliteProjectStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a Project without its calculations
    fn row_to_project(&self, row: &SqliteRow) -> StorageResult<Project> {
        Ok(Project {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            calculations: Vec::new(),
        })
    }

    async fn calculations_of(&self, project_id: i64) -> StorageResult<Vec<Calculation>> {
        let query = format!(
            "SELECT {} FROM calculations WHERE project_id = ? ORDER BY id",
            CALCULATION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_calculation).collect()
    }
}

#[async_trait]
impl ProjectStorage for SqliteProjectStorage {
    async fn find_all(&self) -> StorageResult<Vec<Project>> {
        debug!("Fetching all projects");

        let rows = sqlx::query("SELECT id, name FROM projects ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut projects = rows
            .iter()
            .map(|row| self.row_to_project(row))
            .collect::<Result<Vec<_>, _>>()?;

        if projects.is_empty() {
            return Ok(projects);
        }

        let query = format!(
            "SELECT {} FROM calculations ORDER BY id",
            CALCULATION_COLUMNS
        );
        let calculation_rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut by_project: HashMap<i64, Vec<Calculation>> = HashMap::new();
        for row in &calculation_rows {
            let calculation = row_to_calculation(row)?;
            by_project
                .entry(calculation.project_id)
                .or_default()
                .push(calculation);
        }

        for project in &mut projects {
            project.calculations = by_project.remove(&project.id).unwrap_or_default();
        }

        Ok(projects)
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Project>> {
        debug!("Fetching project: {}", id);

        let row = sqlx::query("SELECT id, name FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => {
                let mut project = self.row_to_project(&row)?;
                project.calculations = self.calculations_of(id).await?;
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, input: ProjectInput) -> StorageResult<Project> {
        debug!("Creating project: {}", input.name);

        let id = sqlx::query("INSERT INTO projects (name) VALUES (?)")
            .bind(&input.name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .last_insert_rowid();

        self.find_by_id(id).await?.ok_or(StorageError::NotFound)
    }

    async fn update(&self, id: i64, input: ProjectInput) -> StorageResult<Project> {
        debug!("Updating project: {}", id);

        let result = sqlx::query("UPDATE projects SET name = ? WHERE id = ?")
            .bind(&input.name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(StorageError::NotFound)
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        debug!("Deleting project: {}", id);

        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> StorageResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }
}

pub struct SqliteCalculationStorage {
    pool: SqlitePool,
}

impl SqliteCalculationStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalculationStorage for SqliteCalculationStorage {
    async fn find_all(&self) -> StorageResult<Vec<Calculation>> {
        debug!("Fetching all calculations");

        let query = format!(
            "SELECT {} FROM calculations ORDER BY id",
            CALCULATION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_calculation).collect()
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Calculation>> {
        debug!("Fetching calculation: {}", id);

        let query = format!("SELECT {} FROM calculations WHERE id = ?", CALCULATION_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(row_to_calculation).transpose()
    }

    async fn find_by_project_id(&self, project_id: i64) -> StorageResult<Vec<Calculation>> {
        debug!("Fetching calculations for project: {}", project_id);

        let query = format!(
            "SELECT {} FROM calculations WHERE project_id = ? ORDER BY id",
            CALCULATION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_calculation).collect()
    }

    async fn find_by_project_id_and_id(
        &self,
        project_id: i64,
        id: i64,
    ) -> StorageResult<Option<Calculation>> {
        debug!("Fetching calculation {} of project {}", id, project_id);

        let query = format!(
            "SELECT {} FROM calculations WHERE project_id = ? AND id = ?",
            CALCULATION_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(project_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(row_to_calculation).transpose()
    }

    async fn save(&self, input: CalculationInput) -> StorageResult<Calculation> {
        debug!(
            "Creating calculation for project {}: {}",
            input.project_id, input.expression
        );

        let id = sqlx::query(
            r#"
            INSERT INTO calculations (project_id, description, expression)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(input.project_id)
        .bind(&input.description)
        .bind(&input.expression)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or(StorageError::NotFound)
    }

    async fn update(&self, id: i64, input: CalculationInput) -> StorageResult<Calculation> {
        debug!("Updating calculation: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE calculations
            SET description = ?, expression = ?, result = NULL
            WHERE id = ? AND project_id = ?
            "#,
        )
        .bind(&input.description)
        .bind(&input.expression)
        .bind(id)
        .bind(input.project_id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(StorageError::NotFound)
    }

    async fn save_result(&self, id: i64, result: Option<f64>) -> StorageResult<()> {
        debug!("Storing result for calculation {}: {:?}", id, result);

        let outcome = sqlx::query("UPDATE calculations SET result = ? WHERE id = ?")
            .bind(result)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if outcome.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        debug!("Deleting calculation: {}", id);

        let result = sqlx::query("DELETE FROM calculations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> StorageResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM calculations")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }
}
