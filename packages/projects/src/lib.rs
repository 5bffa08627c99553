//! # Calculator Projects
//!
//! Service layer sitting between the HTTP controllers and the stores:
//! project and calculation lookups with not-found semantics, plus result
//! computation through a pluggable [`Evaluator`].

use std::sync::Arc;

use calculator_core::{ArithmeticEvaluator, Evaluator};
use calculator_storage::DbState;

pub mod calculations;
pub mod error;
pub mod projects;
pub mod results;

pub use calculations::CalculationService;
pub use error::{ServiceError, ServiceResult};
pub use projects::ProjectService;
pub use results::ResultService;

/// All services, cheap to clone, used as the router state
#[derive(Clone)]
pub struct Services {
    pub projects: ProjectService,
    pub calculations: CalculationService,
    pub results: ResultService,
}

impl Services {
    /// Build the services over a database with the arithmetic evaluator
    pub fn new(db: &DbState) -> Self {
        Self::with_evaluator(db, Arc::new(ArithmeticEvaluator))
    }

    /// Build the services over a database with a custom evaluator
    pub fn with_evaluator(db: &DbState, evaluator: Arc<dyn Evaluator>) -> Self {
        Self {
            projects: ProjectService::new(db.project_storage.clone()),
            calculations: CalculationService::new(db.calculation_storage.clone()),
            results: ResultService::new(db.calculation_storage.clone(), evaluator),
        }
    }
}
