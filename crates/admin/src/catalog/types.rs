//! Catalog API wire and domain types.
//!
//! The backend owns every record here; the console only holds cached copies.
//! Decimal amounts travel as strings on the wire to avoid float rounding.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use verdant_core::{Email, ResetId, UserId};

/// A catalog user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (also the login identifier).
    pub email: Email,
    /// Whether the account has completed confirmation.
    pub active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// A catalog product.
///
/// The console treats the whole product collection as a single replaceable
/// snapshot; individual products are never merged or patched locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend-assigned product ID.
    pub id: String,
    /// Product name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price in the store currency.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Paused products stay in the catalog but are not offered for sale.
    pub paused: bool,
    /// When the product was published.
    pub published_at: DateTime<Utc>,
    /// Ordered image references.
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// A product image reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    /// Backend-assigned image ID.
    pub id: String,
    /// Public URL of the image.
    pub path: String,
}

/// A successful authentication: the user plus their bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// A pending password-reset record.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordReset {
    pub id: ResetId,
}

/// A successful reset-link authorization: the user, the reset record, and a
/// short-lived token scoped to completing the reset.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetAuthorization {
    pub user: User,
    pub reset: PasswordReset,
    pub token: String,
}

/// Outcome of a registration request.
///
/// The backend answers 201 for a new account and another 2xx when the email
/// is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created,
    AlreadyRegistered,
}

/// Input for updating a product.
///
/// Also used for pause/unpause: the original fields are sent back unchanged
/// with only the `paused` flag flipped.
#[derive(Debug, Clone, Serialize)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub paused: bool,
}

/// Input for creating a product, with any staged images.
#[derive(Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<ImageUpload>,
}

/// An image file read out of a multipart form, ready to forward upstream.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// =============================================================================
// Request payloads
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct AuthenticateRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Email + emailed token pair carried by confirmation and reset links.
#[derive(Debug, Serialize)]
pub(crate) struct LinkTokenRequest<'a> {
    pub email: &'a str,
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompleteRegistrationRequest<'a> {
    pub name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResetPasswordRequest<'a> {
    pub reset_id: ResetId,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}
