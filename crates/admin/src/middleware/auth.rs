//! Authentication middleware and extractors.
//!
//! Provides an extractor for requiring a logged-in user in route handlers,
//! and a middleware that re-validates the session's bearer token against the
//! backend before every dashboard request.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::catalog::CatalogError;
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Extractor that requires an authenticated user.
///
/// If no user is logged in, returns a redirect to the login screen.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but the user is not logged in.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or(AuthRejection)?;

        // Get the current user from the session
        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection)?;

        Ok(Self(user))
    }
}

/// Middleware that re-validates the session token against the backend.
///
/// Applied to the dashboard routes: each request checks the stored bearer
/// token via `GET users/authenticated`. A 401 flushes the session and
/// redirects to the login screen; any other backend failure is logged and
/// the request proceeds against the last-known session.
pub async fn verify_session(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let Some(user) = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
    else {
        return Redirect::to("/").into_response();
    };

    match state.catalog().authenticated(user.token()).await {
        Ok(()) => next.run(request).await,
        Err(CatalogError::Unauthorized) => {
            if let Err(e) = session.flush().await {
                tracing::error!("Failed to flush stale session: {e}");
            }
            state.catalog().clear_token().await;
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Session re-validation unavailable: {e}");
            next.run(request).await
        }
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
