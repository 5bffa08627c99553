use std::sync::Arc;

use calculator_core::{Project, ProjectInput};
use calculator_storage::{ProjectStorage, StorageError};
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};

/// Lookups and mutations against the project store
#[derive(Clone)]
pub struct ProjectService {
    storage: Arc<dyn ProjectStorage>,
}

impl ProjectService {
    pub fn new(storage: Arc<dyn ProjectStorage>) -> Self {
        Self { storage }
    }

    /// All projects with their calculations. An empty list is not an error.
    pub async fn list(&self) -> ServiceResult<Vec<Project>> {
        let projects = self.storage.find_all().await?;
        debug!("Retrieved {} projects", projects.len());
        Ok(projects)
    }

    /// A single project, or `ProjectNotFound` carrying the requested id
    pub async fn get(&self, id: i64) -> ServiceResult<Project> {
        self.storage
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(id))
    }

    /// Persist a validated project
    pub async fn create(&self, input: ProjectInput) -> ServiceResult<Project> {
        let project = self.storage.save(input).await?;
        info!("Created project '{}' with ID {}", project.name, project.id);
        Ok(project)
    }

    /// Replace the stored project. Callers check existence with [`get`](Self::get) first.
    pub async fn update(&self, id: i64, input: ProjectInput) -> ServiceResult<Project> {
        let project = self.storage.update(id, input).await.map_err(|e| match e {
            StorageError::NotFound => ServiceError::ProjectNotFound(id),
            other => other.into(),
        })?;
        info!("Updated project '{}' (ID: {})", project.name, project.id);
        Ok(project)
    }

    /// Remove a project and its calculations
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.storage.delete_by_id(id).await.map_err(|e| match e {
            StorageError::NotFound => ServiceError::ProjectNotFound(id),
            other => other.into(),
        })?;
        info!("Deleted project {}", id);
        Ok(())
    }

    pub async fn count(&self) -> ServiceResult<i64> {
        Ok(self.storage.count().await?)
    }
}
