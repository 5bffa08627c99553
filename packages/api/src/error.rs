// ABOUTME: Error type returned by every handler and its HTTP mapping
// ABOUTME: Produces the `{errorMessage}` body and logs server-side failures with a request id

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calculator_core::ValidationError;
use calculator_projects::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Message returned for any failure whose details stay server-side
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request data
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Error body shared by all endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
        }
    }
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Service(service_error) => match service_error {
                ServiceError::ProjectNotFound(_) | ServiceError::CalculationNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                ServiceError::Evaluation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message safe to hand to the client
    fn user_message(&self) -> String {
        match self {
            AppError::Service(ServiceError::Storage(_)) => INTERNAL_ERROR_MESSAGE.to_string(),
            AppError::Service(service_error) => service_error.to_string(),
            validation => validation.to_string(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Service(ServiceError::Storage(err)) => {
                let request_id = Uuid::new_v4().to_string();
                error!(
                    request_id = %request_id,
                    error = %err,
                    "Storage failure while handling request"
                );
            }
            AppError::Service(ServiceError::Evaluation { id, source }) => {
                warn!(calculation_id = id, reason = %source, "Evaluation failed");
            }
            AppError::Validation(msg) => {
                warn!(message = %msg, "Rejected invalid request");
            }
            AppError::Service(_) => {}
        }

        (status, Json(ErrorResponse::new(self.user_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calculator_core::EvalError;
    use calculator_storage::StorageError;
    use serde_json::Value;

    async fn body_of(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404_with_message() {
        let (status, body) = body_of(ServiceError::ProjectNotFound(13).into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorMessage"], "project '13' does not exist");
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let error: AppError = ValidationError::Missing { field: "name" }.into();
        let (status, body) = body_of(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorMessage"], "Validation failed: name is required");
    }

    #[tokio::test]
    async fn test_evaluation_maps_to_422() {
        let error: AppError = ServiceError::Evaluation {
            id: 4,
            source: EvalError::DivisionByZero,
        }
        .into();
        let (status, body) = body_of(error).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["errorMessage"],
            "Calculation '4' could not be evaluated: division by zero"
        );
    }

    #[tokio::test]
    async fn test_storage_details_are_hidden() {
        let error: AppError =
            ServiceError::Storage(StorageError::Io(std::io::Error::other("disk on fire"))).into();
        let (status, body) = body_of(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errorMessage"], INTERNAL_ERROR_MESSAGE);
    }
}
