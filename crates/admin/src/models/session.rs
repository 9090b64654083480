//! Session-related types.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use verdant_core::{Email, UserId};

use crate::catalog::User;

/// Session-stored user identity.
///
/// The cached backend user plus the bearer token issued at login. The whole
/// record is invalidated together: logout or a 401 from the backend flushes
/// the session rather than patching fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's backend ID.
    pub id: UserId,
    /// User's display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// Whether the account is active.
    pub active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Bearer token for catalog API calls.
    token: String,
}

impl CurrentUser {
    /// Build the session record from an authenticated user and their token.
    #[must_use]
    pub fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            active: user.active,
            created_at: user.created_at,
            token,
        }
    }

    /// The bearer token issued at login.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
