mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn products_round_trip_and_are_publicly_readable() {
    let app = TestApp::new().await;
    let token = app.register("seller").await;
    let product_id = app.create_product(&token, "Anejo 12", 149.99).await;

    // Reads need no token.
    let (status, body) = app
        .request(Method::GET, &format!("/products/{product_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Anejo 12");
    assert_eq!(body["price"], 149.99);
    assert_eq!(body["quantity"], 10);
    assert!(body["created_date"].is_string());

    let (status, body) = app.request(Method::GET, "/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn price_bounds_are_inclusive() {
    let app = TestApp::new().await;
    let token = app.register("seller").await;

    // Both ends of the range are allowed.
    app.create_product(&token, "Free Sample", 0.0).await;
    app.create_product(&token, "The Unicorn", 10000.0).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/products",
            Some(&token),
            Some(json!({
                "name": "Too Dear",
                "price": 10000.01,
                "description": "",
                "quantity": 1,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn negative_quantity_is_rejected() {
    let app = TestApp::new().await;
    let token = app.register("seller").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/products",
            Some(&token),
            Some(json!({
                "name": "Phantom Stock",
                "price": 10.0,
                "description": "",
                "quantity": -1,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_is_owner_scoped_and_preserves_created_date() {
    let app = TestApp::new().await;
    let owner = app.register("seller").await;
    let intruder = app.register("intruder").await;
    let product_id = app.create_product(&owner, "Blanco", 25.0).await;

    let (_, before) = app
        .request(Method::GET, &format!("/products/{product_id}"), None, None)
        .await;

    let update = json!({
        "name": "Blanco Especial",
        "price": 29.0,
        "description": "Updated",
        "quantity": 5,
    });

    // A non-owner cannot tell the product apart from a missing one.
    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/products/{product_id}"),
            Some(&intruder),
            Some(update.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/products/{product_id}"),
            Some(&owner),
            Some(update),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, after) = app
        .request(Method::GET, &format!("/products/{product_id}"), None, None)
        .await;
    assert_eq!(after["name"], "Blanco Especial");
    assert_eq!(after["price"], 29.0);
    assert_eq!(after["created_date"], before["created_date"]);
}

#[tokio::test]
async fn delete_is_owner_scoped() {
    let app = TestApp::new().await;
    let owner = app.register("seller").await;
    let intruder = app.register("intruder").await;
    let product_id = app.create_product(&owner, "Reposado", 35.0).await;

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/products/{product_id}"),
            Some(&intruder),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/products/{product_id}"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(Method::GET, &format!("/products/{product_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
