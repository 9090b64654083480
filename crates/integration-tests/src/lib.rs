//! Integration tests for the Verdant admin console.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the console against a catalog API
//! CATALOG_API_URL=http://localhost:4000 cargo run -p verdant-admin
//!
//! # Run integration tests
//! cargo test -p verdant-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Login, logout, and screen gating
//! - `products` - Product CRUD through the real dashboard routes
//!
//! All tests are `#[ignore]`d by default because they require a running
//! console and a catalog API with the seeded test account.

use reqwest::Client;

/// Base URL for the admin console (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Credentials of the seeded test account (configurable via environment).
#[must_use]
pub fn test_credentials() -> (String, String) {
    let email =
        std::env::var("TEST_USER_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password =
        std::env::var("TEST_USER_PASSWORD").unwrap_or_else(|_| "hunter2hunter2".to_string());
    (email, password)
}

/// Create a cookie-store client and log in through the real login route.
///
/// # Panics
///
/// Panics if the console is unreachable or the login is rejected; the tests
/// using this helper are `#[ignore]`d for exactly that reason.
pub async fn authenticated_client() -> Client {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client");

    let base_url = admin_base_url();
    let (email, password) = test_credentials();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to reach the admin console");

    assert!(
        resp.status().is_success() || resp.status().is_redirection(),
        "login was rejected: {}",
        resp.status()
    );

    client
}
