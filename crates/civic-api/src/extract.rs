//! Extractors whose rejections go through `ApiError`, so malformed input
//! gets the same JSON error body as every other failure.

use std::error::Error as _;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use civic_types::api::ValidationErrors;

use crate::error::ApiError;

#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => {
                // The source reads "<path>: <message>" for a nested field,
                // or just "<message>" for the body as a whole.
                let detail = e
                    .source()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| e.body_text());
                let (field, message) = split_field(&detail);
                let mut errors = ValidationErrors::new();
                errors.add(field, message);
                ApiError::Validation(errors)
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Top-level field named by a serde error path such as `images[2]` or
/// `location.address`. Errors without a path belong to `body`.
fn split_field(detail: &str) -> (&str, &str) {
    if let Some((path, message)) = detail.split_once(": ") {
        let field = path
            .split(['.', '['])
            .next()
            .unwrap_or_default();
        let is_path = !field.is_empty()
            && field
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if is_path {
            return (field, message);
        }
    }
    ("body", detail)
}
