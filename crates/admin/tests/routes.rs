//! Router tests against a scripted backend.
//!
//! Drives the assembled console router in-process with `tower::ServiceExt`
//! and a `wiremock` catalog API: the login round trip, the redirect gate on
//! the dashboard, and the refetch-after-mutation cycle.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use secrecy::SecretString;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use verdant_admin::config::{AdminConfig, CatalogApiConfig};
use verdant_admin::middleware::create_session_layer;
use verdant_admin::routes;
use verdant_admin::state::AppState;

fn test_app(server_uri: &str) -> Router {
    let config = AdminConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        session_secret: SecretString::from("x".repeat(32)),
        catalog: CatalogApiConfig::parse(server_uri).expect("valid base url"),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
        tls: None,
    };

    let session_layer = create_session_layer(&config);
    let state = AppState::new(config);

    Router::new()
        .merge(routes::routes(state.clone()))
        .layer(session_layer)
        .with_state(state)
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 7,
        "name": "Ada",
        "email": "ada@example.com",
        "active": true,
        "created_at": "2024-01-15T08:30:00Z"
    })
}

fn product_json() -> serde_json::Value {
    json!({
        "id": "prod-1",
        "name": "Green Tea",
        "description": "Loose leaf",
        "price": "12.90",
        "paused": false,
        "published_at": "2024-05-01T12:00:00Z",
        "images": []
    })
}

/// Log in through the real login route and return the session cookie.
async fn login(app: &Router, server: &MockServer) -> String {
    Mock::given(method("POST"))
        .and(path("/users/authenticate"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({
                "user": user_json(),
                "token": "tok-1"
            })),
        )
        .mount(server)
        .await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(
                    "email=ada%40example.com&password=hunter2hunter2",
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/dashboard/products")
    );

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("login should set a session cookie");
    assert!(cookie.contains("verdant_admin_session"));

    cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn login_page_renders() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Sign in"));
    assert!(body.contains("Create my account"));
}

#[tokio::test]
async fn dashboard_redirects_without_a_session() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard/products")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[tokio::test]
async fn failed_login_redirects_with_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/authenticate"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("email=ada%40example.com&password=wrong-pass"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/?error=credentials")
    );
}

#[tokio::test]
async fn dashboard_renders_the_product_snapshot_after_login() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri());
    let cookie = login(&app, &server).await;

    Mock::given(method("GET"))
        .and(path("/users/authenticated"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json()])))
        .mount(&server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard/products")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Green Tea"));
    assert!(body.contains("Signed in as Ada"));
}

#[tokio::test]
async fn stale_token_clears_the_session_and_redirects() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri());
    let cookie = login(&app, &server).await;

    Mock::given(method("GET"))
        .and(path("/users/authenticated"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard/products")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[tokio::test]
async fn updating_a_product_refetches_the_snapshot() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri());
    let cookie = login(&app, &server).await;

    Mock::given(method("GET"))
        .and(path("/users/authenticated"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products/prod-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    // The mutation must be followed by a full list re-fetch.
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/dashboard/products/prod-1")
                .header(header::COOKIE, cookie)
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(
                    "name=Green+Tea&description=Loose+leaf&price=12.90&paused=false",
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/dashboard/products?success=saved")
    );
}

#[tokio::test]
async fn logout_redirects_to_the_login_screen() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri());
    let cookie = login(&app, &server).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[tokio::test]
async fn confirmation_link_with_unknown_token_renders_the_error_screen() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/new/authenticate"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/confirm?email=ada%40example.com&token=bogus")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("User e-mail or token doesn't exist."));
}
