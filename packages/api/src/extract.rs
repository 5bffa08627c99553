// ABOUTME: Request extractors that reject with AppError instead of axum's defaults
// ABOUTME: A null or malformed body and a non-numeric id both become a 400

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor whose rejection is a validation error
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejection is a validation error
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
