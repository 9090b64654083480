//! Integration tests for authentication screens.
//!
//! These tests require:
//! - A running catalog API with the seeded test account
//! - The admin console running (cargo run -p verdant-admin)
//!
//! Run with: cargo test -p verdant-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect};

use verdant_integration_tests::{admin_base_url, authenticated_client, test_credentials};

/// A client that does not follow redirects, for asserting on them directly.
fn manual_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

#[tokio::test]
#[ignore = "Requires running admin console and catalog API"]
async fn test_login_page_renders() {
    let client = Client::new();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get login page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Sign in"));
}

#[tokio::test]
#[ignore = "Requires running admin console and catalog API"]
async fn test_dashboard_requires_login() {
    let client = manual_redirect_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/dashboard/products"))
        .send()
        .await
        .expect("Failed to get dashboard");

    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[tokio::test]
#[ignore = "Requires running admin console and catalog API"]
async fn test_login_reaches_the_dashboard() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/dashboard/products"))
        .send()
        .await
        .expect("Failed to get dashboard");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Products"));
}

#[tokio::test]
#[ignore = "Requires running admin console and catalog API"]
async fn test_bad_credentials_bounce_back_to_login() {
    let client = manual_redirect_client();
    let base_url = admin_base_url();
    let (email, _) = test_credentials();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("email", email.as_str()), ("password", "definitely-wrong")])
        .send()
        .await
        .expect("Failed to post login");

    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/?error=credentials")
    );
}

#[tokio::test]
#[ignore = "Requires running admin console and catalog API"]
async fn test_logout_ends_the_session() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/auth/logout"))
        .send()
        .await
        .expect("Failed to post logout");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    // The dashboard must be gated again.
    let resp = client
        .get(format!("{base_url}/dashboard/products"))
        .send()
        .await
        .expect("Failed to get dashboard");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Sign in"));
}
