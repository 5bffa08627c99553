// ABOUTME: HTTP request handlers for calculation operations
// ABOUTME: Calculations are always reached through their owning project, which is resolved first

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calculator_core::validate_calculation_input;
use calculator_projects::Services;
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{created, ok_or_no_content};

/// Request body for creating or replacing a calculation
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    pub description: Option<String>,
    pub expression: Option<String>,
}

/// List every calculation across all projects
pub async fn list_all_calculations(
    State(services): State<Services>,
) -> Result<Response, AppError> {
    info!("Listing all calculations");

    let calculations = services.calculations.list_all().await?;
    Ok(ok_or_no_content(calculations))
}

/// List the calculations of one project
pub async fn list_calculations(
    State(services): State<Services>,
    ApiPath(project_id): ApiPath<i64>,
) -> Result<Response, AppError> {
    info!("Listing calculations for project: {}", project_id);

    let project = services.projects.get(project_id).await?;
    let calculations = services.calculations.list_by_project(&project).await?;
    Ok(ok_or_no_content(calculations))
}

/// Create a calculation under a project
pub async fn create_calculation(
    State(services): State<Services>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(request): ApiJson<CalculationRequest>,
) -> Result<Response, AppError> {
    info!("Creating calculation for project: {}", project_id);

    let project = services.projects.get(project_id).await?;
    let input = validate_calculation_input(
        project.id,
        request.description.as_deref(),
        request.expression.as_deref(),
    )?;
    let calculation = services.calculations.create(input).await?;
    Ok(created(calculation))
}

/// Get a single calculation of a project
pub async fn get_calculation(
    State(services): State<Services>,
    ApiPath((project_id, calculation_id)): ApiPath<(i64, i64)>,
) -> Result<Response, AppError> {
    info!(
        "Getting calculation {} of project {}",
        calculation_id, project_id
    );

    let project = services.projects.get(project_id).await?;
    let calculation = services.calculations.get(&project, calculation_id).await?;
    Ok(Json(calculation).into_response())
}

/// Replace a calculation's description and expression
pub async fn update_calculation(
    State(services): State<Services>,
    ApiPath((project_id, calculation_id)): ApiPath<(i64, i64)>,
    ApiJson(request): ApiJson<CalculationRequest>,
) -> Result<Response, AppError> {
    info!(
        "Updating calculation {} of project {}",
        calculation_id, project_id
    );

    let project = services.projects.get(project_id).await?;
    let input = validate_calculation_input(
        project.id,
        request.description.as_deref(),
        request.expression.as_deref(),
    )?;
    services.calculations.get(&project, calculation_id).await?;
    let calculation = services.calculations.update(calculation_id, input).await?;
    Ok(Json(calculation).into_response())
}

/// Delete a calculation of a project
pub async fn delete_calculation(
    State(services): State<Services>,
    ApiPath((project_id, calculation_id)): ApiPath<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    info!(
        "Deleting calculation {} of project {}",
        calculation_id, project_id
    );

    let project = services.projects.get(project_id).await?;
    services
        .calculations
        .delete(&project, calculation_id)
        .await?;
    Ok(StatusCode::OK)
}
