mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn register_then_login_returns_a_valid_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/register",
            None,
            Some(json!({
                "username": "rita",
                "email": "rita@example.com",
                "password": "blue-agave",
                "first_name": "Rita",
                "last_name": "Ortega",
                "phone_number": "5550101",
                "address": "1 Distillery Row",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].is_string());
    let account_id = body["id"].as_i64().unwrap();

    let (status, body) = app
        .request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "rita", "password": "blue-agave" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert!(body["token"].is_string());
    assert_eq!(body["id"].as_i64(), Some(account_id));
}

#[tokio::test]
async fn bad_credentials_return_valid_false_not_401() {
    let app = TestApp::new().await;
    app.register("rita").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "rita", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert!(body.get("token").is_none());

    // Unknown usernames are indistinguishable from bad passwords.
    let (status, body) = app
        .request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "nobody", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn duplicate_usernames_conflict() {
    let app = TestApp::new().await;
    app.register("rita").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/register",
            None,
            Some(json!({
                "username": "rita",
                "email": "other@example.com",
                "password": "something",
                "first_name": "Other",
                "last_name": "Person",
                "phone_number": "5550102",
                "address": "2 Distillery Row",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = TestApp::new().await;

    let (status, _) = app.request(Method::GET, "/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::GET, "/orders", Some("not-a-real-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_creates_the_customer_profile() {
    let app = TestApp::new().await;
    let token = app.register("rita").await;

    let (status, body) = app
        .request(Method::GET, "/customers", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let profiles = body.as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["user"]["username"], "rita");
    assert_eq!(profiles[0]["phone_number"], "5550100");
}

#[tokio::test]
async fn profile_update_changes_contact_fields_and_account() {
    let app = TestApp::new().await;
    let token = app.register("rita").await;

    let (status, _) = app
        .request(
            Method::PUT,
            "/customers/1",
            Some(&token),
            Some(json!({
                "last_name": "Vega",
                "email": "vega@example.com",
                "phone_number": "5550199",
                "address": "9 Barrel House",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app
        .request(Method::GET, "/customers", Some(&token), None)
        .await;
    let profile = &body.as_array().unwrap()[0];
    assert_eq!(profile["address"], "9 Barrel House");
    assert_eq!(profile["user"]["last_name"], "Vega");
    assert_eq!(profile["user"]["email"], "vega@example.com");
}
