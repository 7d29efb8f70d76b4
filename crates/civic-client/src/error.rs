use reqwest::StatusCode;

use civic_types::api::{ErrorBody, ValidationErrors};

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server rejected a submission field by field.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(ValidationErrors),
    #[error("server responded {status}: {body:?}")]
    Api { status: StatusCode, body: ErrorBody },
}

impl ClientError {
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}
