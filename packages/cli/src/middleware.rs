//! Panic handling for the HTTP stack

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calculator_api::{error::INTERNAL_ERROR_MESSAGE, ErrorResponse};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;
use uuid::Uuid;

pub type PanicHandler = fn(Box<dyn std::any::Any + Send + 'static>) -> Response;

/// Create a panic handler that returns consistent error responses
pub fn create_panic_handler() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

/// Handle panic with proper logging and sanitized response
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let panic_message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic occurred"
    };

    error!(
        request_id = %request_id,
        panic_message = %panic_message,
        "Server panic occurred"
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_panic_handler_response_format() {
        let panic_err = Box::new("test panic".to_string());
        let response = handle_panic(panic_err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(body["errorMessage"], "An internal server error occurred");
    }

    #[tokio::test]
    async fn test_panic_handler_hides_panic_message() {
        let response = handle_panic(Box::new("secret detail"));

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();

        assert!(!body.contains("secret detail"));
    }
}
