// ABOUTME: HTTP request handlers for project operations
// ABOUTME: CRUD over projects with validation at the boundary and 404 for unknown ids

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calculator_core::validate_project_input;
use calculator_projects::Services;
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{created, ok_or_no_content};

/// Request body for creating or replacing a project
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    pub name: Option<String>,
}

/// List all projects
pub async fn list_projects(State(services): State<Services>) -> Result<Response, AppError> {
    info!("Listing projects");

    let projects = services.projects.list().await?;
    Ok(ok_or_no_content(projects))
}

/// Create a new project
pub async fn create_project(
    State(services): State<Services>,
    ApiJson(request): ApiJson<ProjectRequest>,
) -> Result<Response, AppError> {
    info!("Creating project: {:?}", request.name);

    let input = validate_project_input(request.name.as_deref())?;
    let project = services.projects.create(input).await?;
    Ok(created(project))
}

/// Get a single project by ID
pub async fn get_project(
    State(services): State<Services>,
    ApiPath(project_id): ApiPath<i64>,
) -> Result<Response, AppError> {
    info!("Getting project: {}", project_id);

    let project = services.projects.get(project_id).await?;
    Ok(Json(project).into_response())
}

/// Replace an existing project
pub async fn update_project(
    State(services): State<Services>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(request): ApiJson<ProjectRequest>,
) -> Result<StatusCode, AppError> {
    info!("Updating project: {}", project_id);

    let input = validate_project_input(request.name.as_deref())?;
    services.projects.get(project_id).await?;
    services.projects.update(project_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a project and its calculations
pub async fn delete_project(
    State(services): State<Services>,
    ApiPath(project_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    info!("Deleting project: {}", project_id);

    services.projects.get(project_id).await?;
    services.projects.delete(project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
