//! Middleware for the admin console.

pub mod auth;
pub mod session;

pub use auth::{RequireAuth, clear_current_user, set_current_user, verify_session};
pub use session::create_session_layer;
