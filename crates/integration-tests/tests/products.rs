//! Integration tests for the product dashboard.
//!
//! These tests require:
//! - A running catalog API with the seeded test account
//! - The admin console running (cargo run -p verdant-admin)
//!
//! Run with: cargo test -p verdant-integration-tests -- --ignored

use reqwest::StatusCode;

use verdant_integration_tests::{admin_base_url, authenticated_client};

/// Pull the product list page and return its HTML.
async fn list_page(client: &reqwest::Client) -> String {
    let base_url = admin_base_url();
    let resp = client
        .get(format!("{base_url}/dashboard/products"))
        .send()
        .await
        .expect("Failed to get products list");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.text().await.expect("Failed to read response")
}

#[tokio::test]
#[ignore = "Requires running admin console and catalog API"]
async fn test_product_create_appears_in_the_list() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let name = format!("Integration Tea {}", std::process::id());

    let form = reqwest::multipart::Form::new()
        .text("name", name.clone())
        .text("description", "Created by the integration suite")
        .text("price", "9.90");

    let resp = client
        .post(format!("{base_url}/dashboard/products"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to create product");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let body = list_page(&client).await;
    assert!(body.contains(&name), "created product should be listed");
}

#[tokio::test]
#[ignore = "Requires running admin console and catalog API"]
async fn test_create_rejects_a_non_decimal_price() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let form = reqwest::multipart::Form::new()
        .text("name", "Bad Price")
        .text("description", "Should be rejected")
        .text("price", "not-a-number");

    let resp = client
        .post(format!("{base_url}/dashboard/products"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to post product");

    // Bounced back to the form with the validation banner.
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Price must be a decimal number."));
}

#[tokio::test]
#[ignore = "Requires running admin console and catalog API"]
async fn test_delete_requires_the_armed_confirmation() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let body = list_page(&client).await;

    // The idle list renders the arming link, never the armed delete form.
    assert!(body.contains("confirm_delete="));
    assert!(!body.contains("Confirm delete"));
}
