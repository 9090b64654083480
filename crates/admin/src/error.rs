//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;

/// Application-level error type for the admin console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Multipart form upload could not be read.
    #[error("Upload error: {0}")]
    Upload(#[from] axum::extract::multipart::MultipartError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Stale bearer token: back to the login screen, never an error page.
        if matches!(self, Self::Catalog(CatalogError::Unauthorized)) {
            return Redirect::to("/").into_response();
        }

        // Capture server-side errors to Sentry
        if matches!(
            self,
            Self::Catalog(
                CatalogError::Http(_) | CatalogError::Status(_) | CatalogError::Endpoint(_)
            ) | Self::Session(_)
                | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Catalog(err) => match err {
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::InvalidCredentials | CatalogError::LinkRejected => {
                    StatusCode::UNAUTHORIZED
                }
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upload(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Catalog(err) => match err {
                CatalogError::NotFound(resource) => format!("Not found: {resource}"),
                CatalogError::InvalidCredentials => "Invalid credentials".to_string(),
                CatalogError::LinkRejected => "Link is no longer valid".to_string(),
                _ => "Catalog service error".to_string(),
            },
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Upload(_) => "Upload could not be read".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
