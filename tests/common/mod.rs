#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bazaar_api::{config::AppConfig, db, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Harness spinning up the application against a fresh in-memory SQLite
/// database. Each test constructs its own instance, so state never leaks
/// between tests.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_config = db::DbConfig {
            url: "sqlite::memory:".to_string(),
            // A single connection keeps every query on the same in-memory
            // database.
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = db::establish_connection_with_config(&db_config)
            .await
            .expect("failed to open in-memory database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let cfg = AppConfig {
            database_url: db_config.url.clone(),
            jwt_secret: "integration_test_secret_that_is_long_enough_to_validate".to_string(),
            jwt_expiration: 3600,
            host: "127.0.0.1".to_string(),
            port: 18_000,
            environment: "test".to_string(),
            log_level: "warn".to_string(),
            log_json: false,
            auto_migrate: false,
        };

        let state = AppState::new(Arc::new(pool), cfg);
        let router = bazaar_api::app_router(state.clone());

        Self { router, state }
    }

    /// Sends one request through the router and returns status plus parsed
    /// body (Null when the response has no content).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is not JSON")
        };

        (status, value)
    }

    /// Registers an account with a customer profile and returns its token.
    pub async fn register(&self, username: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": "agave-and-lime",
                    "first_name": "Test",
                    "last_name": "Customer",
                    "phone_number": "5550100",
                    "address": "12 Agave Way",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
        body["token"].as_str().expect("token missing").to_string()
    }

    /// Creates a product owned by the token's customer and returns its id.
    pub async fn create_product(&self, token: &str, name: &str, price: f64) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                "/products",
                Some(token),
                Some(json!({
                    "name": name,
                    "price": price,
                    "description": "A fine bottle",
                    "quantity": 10,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "product creation failed: {body}");
        body["id"].as_i64().expect("product id missing")
    }

    /// Opens an unpurchased order for the token's customer and returns its id.
    pub async fn open_order(&self, token: &str) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                "/orders",
                Some(token),
                Some(json!({ "purchased": false, "created_date": "2024-01-01" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "order creation failed: {body}");
        body["id"].as_i64().expect("order id missing")
    }
}
