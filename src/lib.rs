//! Bazaar API Library
//!
//! Marketplace backend: catalog, customer carts and orders, and product
//! ratings/reviews over a relational store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{extract::FromRef, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub auth: Arc<auth::AuthService>,
    pub services: services::AppServices,
}

impl AppState {
    pub fn new(db: Arc<db::DbPool>, config: config::AppConfig) -> Self {
        let auth_config = auth::AuthConfig::new(
            config.jwt_secret.clone(),
            Duration::from_secs(config.jwt_expiration),
        );
        let auth = Arc::new(auth::AuthService::new(auth_config, db.clone()));
        let services = services::AppServices::new(db.clone());

        Self {
            db,
            config,
            auth,
            services,
        }
    }
}

// The AuthUser extractor pulls the auth service straight from the state.
impl FromRef<AppState> for Arc<auth::AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Assembles the full application router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(handlers::auth::auth_routes())
        .merge(handlers::customers::customer_routes())
        .merge(handlers::products::product_routes())
        .merge(handlers::orders::order_routes())
        .merge(handlers::line_items::line_item_routes())
        .merge(handlers::ratings::rating_routes())
        .merge(handlers::reviews::review_routes())
        .route("/health", get(health))
        .with_state(state)
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
