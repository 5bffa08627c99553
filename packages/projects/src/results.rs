// ABOUTME: Result computation for stored calculations
// ABOUTME: Evaluates expressions, persists the outcome and returns the refreshed calculations

use std::sync::Arc;

use calculator_core::{Calculation, Evaluator, Project};
use calculator_storage::{CalculationStorage, StorageError};
use tracing::{debug, warn};

use crate::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct ResultService {
    storage: Arc<dyn CalculationStorage>,
    evaluator: Arc<dyn Evaluator>,
}

impl ResultService {
    pub fn new(storage: Arc<dyn CalculationStorage>, evaluator: Arc<dyn Evaluator>) -> Self {
        Self { storage, evaluator }
    }

    /// Compute and store results for every calculation.
    ///
    /// A calculation whose expression fails to evaluate keeps a `null` result;
    /// the batch itself never fails on evaluation.
    pub async fn compute_all(&self) -> ServiceResult<Vec<Calculation>> {
        let calculations = self.storage.find_all().await?;
        self.compute_batch(calculations).await
    }

    /// Compute and store results for the calculations of one project
    pub async fn compute_for_project(&self, project: &Project) -> ServiceResult<Vec<Calculation>> {
        let calculations = self.storage.find_by_project_id(project.id).await?;
        self.compute_batch(calculations).await
    }

    /// Compute and store the result of a single calculation.
    ///
    /// Unlike the batch variants an evaluation failure is reported to the caller
    /// and the stored result is left untouched.
    pub async fn compute_for_calculation(
        &self,
        calculation: Calculation,
    ) -> ServiceResult<Calculation> {
        let value = self
            .evaluator
            .evaluate(&calculation.expression)
            .map_err(|source| ServiceError::Evaluation {
                id: calculation.id,
                source,
            })?;

        self.storage
            .save_result(calculation.id, Some(value))
            .await
            .map_err(|e| match e {
                StorageError::NotFound => ServiceError::CalculationNotFound(calculation.id),
                other => other.into(),
            })?;
        debug!("Calculation {} evaluated to {}", calculation.id, value);

        Ok(Calculation {
            result: Some(value),
            ..calculation
        })
    }

    async fn compute_batch(
        &self,
        calculations: Vec<Calculation>,
    ) -> ServiceResult<Vec<Calculation>> {
        let mut computed = Vec::with_capacity(calculations.len());

        for calculation in calculations {
            let result = match self.evaluator.evaluate(&calculation.expression) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(
                        "Calculation {} could not be evaluated: {}",
                        calculation.id, e
                    );
                    None
                }
            };

            match self.storage.save_result(calculation.id, result).await {
                Ok(()) => {}
                Err(StorageError::NotFound) => {
                    // Removed by a concurrent request since the listing
                    debug!(
                        "Calculation {} was deleted before its result was stored",
                        calculation.id
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
            computed.push(Calculation {
                result,
                ..calculation
            });
        }

        debug!("Computed {} results", computed.len());
        Ok(computed)
    }
}
