use axum::{extract::State, Json};
use calculator_projects::Services;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AppError;

const SERVICE_NAME: &str = "calculator";

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": unix_timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE_NAME
    }))
}

pub async fn status_check(State(services): State<Services>) -> Result<Json<Value>, AppError> {
    let projects = services.projects.count().await?;
    let calculations = services.calculations.count().await?;

    Ok(Json(json!({
        "status": "healthy",
        "timestamp": unix_timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE_NAME,
        "counts": {
            "projects": projects,
            "calculations": calculations
        }
    })))
}
