//! Errors raised at the fetch boundary.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single catalog request
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The server answered with a non-success status
    #[error("HTTP error {status}: {message}")]
    Http { status: StatusCode, message: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the expected document
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            CatalogError::Decode(e.to_string())
        } else {
            CatalogError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}

/// Result type for catalog requests
pub type Result<T> = std::result::Result<T, CatalogError>;
