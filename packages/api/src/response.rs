// ABOUTME: Shared success responses for the controllers
// ABOUTME: Collection listings collapse to 204 when empty; creations answer 201 with the stored body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 200 with the list, or 204 without a body when there is nothing to list
pub fn ok_or_no_content<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::OK, Json(items)).into_response()
    }
}

/// 201 with the created resource
pub fn created<T: Serialize>(item: T) -> Response {
    (StatusCode::CREATED, Json(item)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_no_content() {
        let response = ok_or_no_content(Vec::<i64>::new());
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_non_empty_list_is_ok() {
        let response = ok_or_no_content(vec![1, 2, 3]);
        assert_eq!(response.status(), StatusCode::OK);
    }
}
