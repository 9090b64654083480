//! HTTP route handlers for the admin console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (wired in main)
//!
//! # Auth
//! GET  /                       - Login page
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//! GET  /register               - Registration page
//! POST /register               - Registration action
//! GET  /confirm                - Confirmation-link landing (email + token)
//! POST /confirm                - Finish registration (name + password)
//! GET  /reset                  - Reset-link landing (email + token)
//! POST /reset                  - Set new password
//! POST /forgot                 - Request a password-reset email
//!
//! # Dashboard (requires auth; session re-validated per request)
//! GET  /dashboard              - Redirect to the product list
//! GET  /dashboard/products     - Product list (?confirm_delete arms delete)
//! POST /dashboard/products     - Create product (multipart)
//! GET  /dashboard/products/new - Create form
//! GET  /dashboard/products/{id}/edit - Edit form (?confirm_image_delete)
//! POST /dashboard/products/{id}        - Update product
//! POST /dashboard/products/{id}/pause  - Toggle paused flag
//! POST /dashboard/products/{id}/delete - Delete product
//! POST /dashboard/products/{id}/images - Upload an image
//! POST /dashboard/products/images/{id}/delete - Delete an image
//! ```

pub mod auth;
pub mod products;

use axum::{
    Router,
    middleware::from_fn_with_state,
    response::Redirect,
    routing::{get, post},
};

use crate::middleware::verify_session;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::login_page))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/confirm", get(auth::confirm_page).post(auth::confirm))
        .route("/reset", get(auth::reset_page).post(auth::reset))
        .route("/forgot", post(auth::forgot_password))
}

/// Create the dashboard routes router.
///
/// Every request re-validates the session's bearer token against the
/// backend before the handler runs; a 401 clears the session and redirects
/// to the login screen.
pub fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard/products") }))
        .route(
            "/products",
            get(products::list::index).post(products::create::create),
        )
        .route("/products/new", get(products::create::new_page))
        .route("/products/{id}", post(products::edit::update))
        .route("/products/{id}/edit", get(products::edit::edit_page))
        .route("/products/{id}/pause", post(products::actions::toggle_pause))
        .route("/products/{id}/delete", post(products::actions::delete))
        .route("/products/{id}/images", post(products::images::upload))
        .route(
            "/products/images/{id}/delete",
            post(products::images::remove),
        )
        .route_layer(from_fn_with_state(state, verify_session))
}

/// Create all routes for the admin console.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .nest("/dashboard", dashboard_routes(state))
}
