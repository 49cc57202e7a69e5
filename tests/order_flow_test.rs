mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn order_round_trip_returns_identical_fields_and_empty_line_items() {
    let app = TestApp::new().await;
    let token = app.register("buyer").await;

    let (status, created) = app
        .request(
            Method::POST,
            "/orders",
            Some(&token),
            Some(json!({ "purchased": false, "created_date": "2024-01-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["purchased"], false);
    assert_eq!(created["created_date"], "2024-01-01");
    assert_eq!(created["lineitems"], json!([]));

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = app
        .request(Method::GET, &format!("/orders/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["purchased"], created["purchased"]);
    assert_eq!(fetched["created_date"], created["created_date"]);
    assert_eq!(fetched["lineitems"], json!([]));
}

#[tokio::test]
async fn each_customer_has_at_most_one_open_order() {
    let app = TestApp::new().await;
    let token = app.register("buyer").await;
    let open_id = app.open_order(&token).await;

    // A second open cart is rejected outright.
    let (status, _) = app
        .request(
            Method::POST,
            "/orders",
            Some(&token),
            Some(json!({ "purchased": false, "created_date": "2024-01-02" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Purchased orders are unconstrained.
    let (status, purchased) = app
        .request(
            Method::POST,
            "/orders",
            Some(&token),
            Some(json!({ "purchased": true, "created_date": "2024-01-02" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Reopening a purchased order while the cart exists would duplicate it.
    let purchased_id = purchased["id"].as_i64().unwrap();
    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/orders/{purchased_id}"),
            Some(&token),
            Some(json!({ "purchased": false, "created_date": "2024-01-02" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Updating the open order itself stays legal.
    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/orders/{open_id}"),
            Some(&token),
            Some(json!({ "purchased": false, "created_date": "2024-01-05" })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn foreign_orders_are_indistinguishable_from_missing_ones() {
    let app = TestApp::new().await;
    let owner = app.register("buyer").await;
    let intruder = app.register("intruder").await;
    let order_id = app.open_order(&owner).await;

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/orders/{order_id}"),
            Some(&intruder),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    // No order data leaks on the miss.
    assert!(body.get("purchased").is_none());

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/orders/{order_id}"),
            Some(&intruder),
            Some(json!({ "purchased": true, "created_date": "2024-02-02" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/orders/{order_id}"),
            Some(&intruder),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner still sees the order untouched.
    let (status, body) = app
        .request(
            Method::GET,
            &format!("/orders/{order_id}"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["purchased"], false);
}

#[tokio::test]
async fn update_and_delete_work_for_the_owner() {
    let app = TestApp::new().await;
    let token = app.register("buyer").await;
    let order_id = app.open_order(&token).await;

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/orders/{order_id}"),
            Some(&token),
            Some(json!({ "purchased": true, "created_date": "2024-03-03" })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app
        .request(
            Method::GET,
            &format!("/orders/{order_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(body["purchased"], true);
    assert_eq!(body["created_date"], "2024-03-03");

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/orders/{order_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            Method::GET,
            &format!("/orders/{order_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting an id that never existed is the same miss.
    let (status, _) = app
        .request(Method::DELETE, "/orders/9999", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn line_item_creation_without_an_open_order_is_a_distinct_client_error() {
    let app = TestApp::new().await;
    let seller = app.register("seller").await;
    let buyer = app.register("buyer").await;
    let product_id = app.create_product(&seller, "Anejo", 99.0).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/order_products",
            Some(&buyer),
            Some(json!({ "productId": product_id })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().contains("open order"));

    // A purchased order does not count as open.
    let order_id = app.open_order(&buyer).await;
    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/orders/{order_id}"),
            Some(&buyer),
            Some(json!({ "purchased": true, "created_date": "2024-01-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            Method::POST,
            "/order_products",
            Some(&buyer),
            Some(json!({ "productId": product_id })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn line_items_resolve_to_the_open_order_and_nest_their_product() {
    let app = TestApp::new().await;
    let seller = app.register("seller").await;
    let buyer = app.register("buyer").await;
    let product_id = app.create_product(&seller, "Anejo", 99.0).await;
    let order_id = app.open_order(&buyer).await;

    let (status, item) = app
        .request(
            Method::POST,
            "/order_products",
            Some(&buyer),
            Some(json!({ "productId": product_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["order"]["id"].as_i64(), Some(order_id));
    assert_eq!(item["product"]["id"].as_i64(), Some(product_id));
    assert_eq!(item["product"]["name"], "Anejo");

    // One row per unit: adding the same product again makes a second item.
    let (status, _) = app
        .request(
            Method::POST,
            "/order_products",
            Some(&buyer),
            Some(json!({ "productId": product_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, order) = app
        .request(
            Method::GET,
            &format!("/orders/{order_id}"),
            Some(&buyer),
            None,
        )
        .await;
    let lineitems = order["lineitems"].as_array().unwrap();
    assert_eq!(lineitems.len(), 2);
    assert_eq!(lineitems[0]["product"]["id"].as_i64(), Some(product_id));

    // Inventory is untouched by line-item creation.
    let (_, product) = app
        .request(Method::GET, &format!("/products/{product_id}"), None, None)
        .await;
    assert_eq!(product["quantity"], 10);
}

#[tokio::test]
async fn line_item_reads_update_and_delete() {
    let app = TestApp::new().await;
    let seller = app.register("seller").await;
    let buyer = app.register("buyer").await;
    let first_product = app.create_product(&seller, "Blanco", 20.0).await;
    let second_product = app.create_product(&seller, "Reposado", 30.0).await;
    let order_id = app.open_order(&buyer).await;

    let (_, item) = app
        .request(
            Method::POST,
            "/order_products",
            Some(&buyer),
            Some(json!({ "productId": first_product })),
        )
        .await;
    let item_id = item["id"].as_i64().unwrap();

    // Filtered listing is public.
    let (status, body) = app
        .request(
            Method::GET,
            &format!("/order_products?order={order_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app
        .request(Method::GET, "/order_products?order=9999", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    // Repoint the line item at another product.
    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/order_products/{item_id}"),
            Some(&buyer),
            Some(json!({ "orderId": order_id, "productId": second_product })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app
        .request(
            Method::GET,
            &format!("/order_products/{item_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(body["product"]["id"].as_i64(), Some(second_product));

    // Repointing at an unknown referent is a validation failure.
    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/order_products/{item_id}"),
            Some(&buyer),
            Some(json!({ "orderId": 9999, "productId": second_product })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/order_products/{item_id}"),
            Some(&buyer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            Method::GET,
            &format!("/order_products/{item_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_product_on_line_item_creation_is_rejected() {
    let app = TestApp::new().await;
    let buyer = app.register("buyer").await;
    app.open_order(&buyer).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/order_products",
            Some(&buyer),
            Some(json!({ "productId": 424242 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_listing_is_stable_and_scoped_to_the_owner() {
    let app = TestApp::new().await;
    let buyer = app.register("buyer").await;
    let other = app.register("other").await;

    let first = app.open_order(&buyer).await;
    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/orders/{first}"),
            Some(&buyer),
            Some(json!({ "purchased": true, "created_date": "2024-01-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let second = app.open_order(&buyer).await;
    app.open_order(&other).await;

    let (status, body) = app.request(Method::GET, "/orders", Some(&buyer), None).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"].as_i64(), Some(first));
    assert_eq!(orders[1]["id"].as_i64(), Some(second));
}
