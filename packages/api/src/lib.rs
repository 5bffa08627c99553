// ABOUTME: HTTP API layer for the calculator service providing REST endpoints and routing
// ABOUTME: Controllers map service outcomes onto status codes; all state lives in `Services`

use axum::{routing::get, Router};

use calculator_projects::Services;

pub mod calculations_handlers;
pub mod error;
pub mod extract;
pub mod health;
pub mod projects_handlers;
pub mod response;
pub mod results_handlers;

pub use error::{AppError, ErrorResponse};

/// Creates the projects router
pub fn create_projects_router() -> Router<Services> {
    Router::new()
        .route(
            "/projects",
            get(projects_handlers::list_projects).post(projects_handlers::create_project),
        )
        .route(
            "/projects/{project_id}",
            get(projects_handlers::get_project)
                .put(projects_handlers::update_project)
                .delete(projects_handlers::delete_project),
        )
}

/// Creates the calculations router (nested under a project, plus the global listing)
pub fn create_calculations_router() -> Router<Services> {
    Router::new()
        .route(
            "/calculations",
            get(calculations_handlers::list_all_calculations),
        )
        .route(
            "/projects/{project_id}/calculations",
            get(calculations_handlers::list_calculations)
                .post(calculations_handlers::create_calculation),
        )
        .route(
            "/projects/{project_id}/calculations/{calculation_id}",
            get(calculations_handlers::get_calculation)
                .put(calculations_handlers::update_calculation)
                .delete(calculations_handlers::delete_calculation),
        )
}

/// Creates the results router
pub fn create_results_router() -> Router<Services> {
    Router::new()
        .route(
            "/calculations/result",
            get(results_handlers::compute_all_results),
        )
        .route(
            "/projects/{project_id}/result",
            get(results_handlers::compute_project_results),
        )
        .route(
            "/projects/{project_id}/calculations/{calculation_id}/result",
            get(results_handlers::compute_calculation_result),
        )
}

/// Creates the health router
pub fn create_health_router() -> Router<Services> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/status", get(health::status_check))
}

/// Assemble every router over the given services
pub fn create_router(services: Services) -> Router {
    Router::new()
        .merge(create_projects_router())
        .merge(create_calculations_router())
        .merge(create_results_router())
        .merge(create_health_router())
        .with_state(services)
}
