use std::sync::Arc;

use calculator_core::{Calculation, CalculationInput, Project};
use calculator_storage::{CalculationStorage, StorageError};
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};

/// Lookups and mutations against the calculation store, scoped by project
#[derive(Clone)]
pub struct CalculationService {
    storage: Arc<dyn CalculationStorage>,
}

impl CalculationService {
    pub fn new(storage: Arc<dyn CalculationStorage>) -> Self {
        Self { storage }
    }

    /// Every calculation across all projects
    pub async fn list_all(&self) -> ServiceResult<Vec<Calculation>> {
        let calculations = self.storage.find_all().await?;
        debug!("Retrieved {} calculations", calculations.len());
        Ok(calculations)
    }

    pub async fn list_by_project(&self, project: &Project) -> ServiceResult<Vec<Calculation>> {
        Ok(self.storage.find_by_project_id(project.id).await?)
    }

    /// A calculation under the given project, or `CalculationNotFound` carrying the id
    pub async fn get(&self, project: &Project, id: i64) -> ServiceResult<Calculation> {
        self.storage
            .find_by_project_id_and_id(project.id, id)
            .await?
            .ok_or(ServiceError::CalculationNotFound(id))
    }

    pub async fn create(&self, input: CalculationInput) -> ServiceResult<Calculation> {
        let calculation = self.storage.save(input).await?;
        info!(
            "Created calculation {} in project {}",
            calculation.id, calculation.project_id
        );
        Ok(calculation)
    }

    /// Replace description and expression; the previous result is discarded.
    pub async fn update(&self, id: i64, input: CalculationInput) -> ServiceResult<Calculation> {
        let calculation = self.storage.update(id, input).await.map_err(|e| match e {
            StorageError::NotFound => ServiceError::CalculationNotFound(id),
            other => other.into(),
        })?;
        info!("Updated calculation {}", calculation.id);
        Ok(calculation)
    }

    pub async fn delete(&self, project: &Project, id: i64) -> ServiceResult<()> {
        // The scoped lookup keeps a calculation of another project out of reach
        self.get(project, id).await?;
        self.storage.delete_by_id(id).await.map_err(|e| match e {
            StorageError::NotFound => ServiceError::CalculationNotFound(id),
            other => other.into(),
        })?;
        info!("Deleted calculation {} from project {}", id, project.id);
        Ok(())
    }

    pub async fn count(&self) -> ServiceResult<i64> {
        Ok(self.storage.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calculator_core::ProjectInput;
    use calculator_storage::DbState;
    use pretty_assertions::assert_eq;

    async fn setup() -> (CalculationService, Project, Project) {
        let db = DbState::in_memory().await.unwrap();
        let owner = db
            .project_storage
            .save(ProjectInput {
                name: "Owner".to_string(),
            })
            .await
            .unwrap();
        let other = db
            .project_storage
            .save(ProjectInput {
                name: "Other".to_string(),
            })
            .await
            .unwrap();
        (
            CalculationService::new(db.calculation_storage),
            owner,
            other,
        )
    }

    fn input(project: &Project, expression: &str) -> CalculationInput {
        CalculationInput {
            project_id: project.id,
            description: Some("test".to_string()),
            expression: expression.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_by_project_is_scoped() {
        let (service, owner, other) = setup().await;

        service.create(input(&owner, "1 + 1")).await.unwrap();
        service.create(input(&other, "2 + 2")).await.unwrap();

        let owned = service.list_by_project(&owner).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].expression, "1 + 1");

        assert_eq!(service.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_under_wrong_project_is_not_found() {
        let (service, owner, other) = setup().await;

        let created = service.create(input(&owner, "3")).await.unwrap();
        assert_eq!(service.get(&owner, created.id).await.unwrap(), created);

        let error = service.get(&other, created.id).await.unwrap_err();
        assert!(matches!(error, ServiceError::CalculationNotFound(id) if id == created.id));
    }

    #[tokio::test]
    async fn test_delete_under_wrong_project_keeps_calculation() {
        let (service, owner, other) = setup().await;

        let created = service.create(input(&owner, "3")).await.unwrap();

        assert!(service.delete(&other, created.id).await.is_err());
        assert!(service.get(&owner, created.id).await.is_ok());

        service.delete(&owner, created.id).await.unwrap();
        assert!(matches!(
            service.delete(&owner, created.id).await,
            Err(ServiceError::CalculationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (service, owner, _) = setup().await;

        assert!(matches!(
            service.update(5, input(&owner, "1")).await,
            Err(ServiceError::CalculationNotFound(5))
        ));
    }
}
