use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::common::{created_response, no_content_response, success_response};
use crate::services::orders::{CreateOrderInput, UpdateOrderInput};
use crate::AppState;

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}", put(update_order))
        .route("/orders/{id}", delete(delete_order))
}

/// List the acting customer's orders with nested line items
#[utoipa::path(
    get,
    path = "/orders",
    responses((status = 200, description = "The customer's orders", body = [crate::services::orders::OrderResponse])),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    let orders = state.services.orders.list_orders(customer.id).await?;
    Ok(success_response(orders))
}

/// Fetch one of the acting customer's orders. A foreign order returns 404,
/// exactly like a missing one.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    responses(
        (status = 200, description = "The order", body = crate::services::orders::OrderResponse),
        (status = 404, description = "Absent or owned by someone else"),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    let order = state.services.orders.get_order(customer.id, id).await?;
    Ok(success_response(order))
}

/// Open a new order for the acting customer
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderInput,
    responses(
        (status = 201, description = "Order created", body = crate::services::orders::OrderResponse),
        (status = 409, description = "The customer already has an open order"),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    let order = state
        .services
        .orders
        .create_order(customer.id, payload)
        .await?;
    Ok(created_response(order))
}

/// Update the purchased flag and creation date of an owned order
#[utoipa::path(
    put,
    path = "/orders/{id}",
    request_body = UpdateOrderInput,
    responses(
        (status = 204, description = "Order updated"),
        (status = 404, description = "Absent or owned by someone else"),
        (status = 409, description = "Reopening would duplicate the open order"),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    state
        .services
        .orders
        .update_order(customer.id, id, payload)
        .await?;
    Ok(no_content_response())
}

/// Delete an owned order
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Absent or owned by someone else"),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    state.services.orders.delete_order(customer.id, id).await?;
    Ok(no_content_response())
}
