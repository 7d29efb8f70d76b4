use axum::{Json, http::StatusCode, response::IntoResponse};
use tracing::error;

use civic_types::api::{ErrorBody, ValidationErrors};

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(ValidationErrors),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("missing or unknown viewer")]
    Unauthorized,
    #[error("viewer may not perform this action")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(anyhow::Error),
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// HTTP response builder for ApiError
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(fields) => ErrorBody::Validation { fields },
            ApiError::BadRequest(message) => ErrorBody::BadRequest { message },
            ApiError::Unauthorized => ErrorBody::Unauthorized,
            ApiError::Forbidden => ErrorBody::Forbidden,
            ApiError::NotFound => ErrorBody::NotFound,
            ApiError::Conflict(message) => ErrorBody::Conflict { message },
            ApiError::Database(e) => {
                error!("Database error: {:#}", e);
                ErrorBody::Internal
            }
            ApiError::Internal => ErrorBody::Internal,
        };

        (status, Json(body)).into_response()
    }
}
