// ABOUTME: HTTP request handlers that compute calculation results
// ABOUTME: Results are evaluated, stored and returned with the calculations they belong to

use axum::{extract::State, Json};
use calculator_core::Calculation;
use calculator_projects::Services;
use tracing::info;

use crate::error::AppError;
use crate::extract::ApiPath;

/// Compute results for every calculation
pub async fn compute_all_results(
    State(services): State<Services>,
) -> Result<Json<Vec<Calculation>>, AppError> {
    info!("Computing results for all calculations");

    let calculations = services.results.compute_all().await?;
    Ok(Json(calculations))
}

/// Compute results for the calculations of one project
pub async fn compute_project_results(
    State(services): State<Services>,
    ApiPath(project_id): ApiPath<i64>,
) -> Result<Json<Vec<Calculation>>, AppError> {
    info!("Computing results for project: {}", project_id);

    let project = services.projects.get(project_id).await?;
    let calculations = services.results.compute_for_project(&project).await?;
    Ok(Json(calculations))
}

/// Compute the result of a single calculation
pub async fn compute_calculation_result(
    State(services): State<Services>,
    ApiPath((project_id, calculation_id)): ApiPath<(i64, i64)>,
) -> Result<Json<Calculation>, AppError> {
    info!(
        "Computing result for calculation {} of project {}",
        calculation_id, project_id
    );

    let project = services.projects.get(project_id).await?;
    let calculation = services.calculations.get(&project, calculation_id).await?;
    let calculation = services.results.compute_for_calculation(calculation).await?;
    Ok(Json(calculation))
}
