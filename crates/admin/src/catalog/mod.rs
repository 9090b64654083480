//! Remote catalog API client.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local persistence, direct API
//!   calls per request
//! - Thin REST wrapper: a base URL plus a mutable default bearer token
//! - Every mutation is followed by a full product re-fetch by the caller;
//!   the client itself is stateless apart from the token
//!
//! # Example
//!
//! ```rust,ignore
//! use verdant_admin::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! let auth = client.authenticate("ada@example.com", "hunter2hunter2").await?;
//! client.set_token(auth.token.clone()).await;
//!
//! let products = client.list_products().await?;
//! ```

mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::*;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport or body decoding failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Login was rejected (any sub-500 status other than 201).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A confirmation or reset link's email/token pair was rejected.
    #[error("link token rejected")]
    LinkRejected,

    /// The bearer token was missing or stale (HTTP 401).
    #[error("not authorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other unexpected status.
    #[error("catalog API returned status {0}")]
    Status(StatusCode),
}

impl CatalogError {
    /// Map a non-success response status to the matching error variant.
    pub(crate) fn from_status(status: StatusCode, resource: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound(resource.to_string()),
            other => Self::Status(other),
        }
    }
}
