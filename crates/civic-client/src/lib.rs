//! Typed access to the civic HTTP API plus the view state the resident
//! pages keep between requests.

pub mod api;
pub mod error;
pub mod feed;
pub mod submit;

pub use api::{ApiClient, CivicApi};
pub use error::{ClientError, Result};

#[cfg(test)]
mod fake;
