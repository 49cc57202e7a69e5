use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::common::{created_response, no_content_response, success_response};
use crate::services::orders::{AddLineItemInput, UpdateLineItemInput};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LineItemListQuery {
    /// Restrict to line items of one order
    pub order: Option<i64>,
}

pub fn line_item_routes() -> Router<AppState> {
    Router::new()
        .route("/order_products", get(list_line_items))
        .route("/order_products", post(create_line_item))
        .route("/order_products/{id}", get(get_line_item))
        .route("/order_products/{id}", put(update_line_item))
        .route("/order_products/{id}", delete(delete_line_item))
}

/// Add one unit of a product to the acting customer's open order
#[utoipa::path(
    post,
    path = "/order_products",
    request_body = AddLineItemInput,
    responses(
        (status = 201, description = "Line item appended", body = crate::services::orders::LineItemResponse),
        (status = 422, description = "The customer has no open order"),
        (status = 400, description = "Unknown product"),
    ),
    security(("bearer_auth" = [])),
    tag = "line items"
)]
pub async fn create_line_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddLineItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    let item = state
        .services
        .orders
        .add_line_item(customer.id, payload.product_id)
        .await?;
    Ok(created_response(item))
}

/// List line items, optionally restricted to one order
#[utoipa::path(
    get,
    path = "/order_products",
    params(LineItemListQuery),
    responses((status = 200, description = "Line items", body = [crate::services::orders::LineItemResponse])),
    tag = "line items"
)]
pub async fn list_line_items(
    State(state): State<AppState>,
    Query(query): Query<LineItemListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.orders.list_line_items(query.order).await?;
    Ok(success_response(items))
}

/// Fetch one line item with its order and product expanded
#[utoipa::path(
    get,
    path = "/order_products/{id}",
    responses(
        (status = 200, description = "The line item", body = crate::services::orders::LineItemResponse),
        (status = 404, description = "Unknown line item"),
    ),
    tag = "line items"
)]
pub async fn get_line_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.orders.get_line_item(id).await?;
    Ok(success_response(item))
}

/// Repoint a line item at a different order and product
#[utoipa::path(
    put,
    path = "/order_products/{id}",
    request_body = UpdateLineItemInput,
    responses(
        (status = 204, description = "Line item updated"),
        (status = 404, description = "Unknown line item"),
        (status = 400, description = "Unknown order or product"),
    ),
    security(("bearer_auth" = [])),
    tag = "line items"
)]
pub async fn update_line_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLineItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.orders.update_line_item(id, payload).await?;
    Ok(no_content_response())
}

/// Remove a line item
#[utoipa::path(
    delete,
    path = "/order_products/{id}",
    responses(
        (status = 204, description = "Line item deleted"),
        (status = 404, description = "Unknown line item"),
    ),
    security(("bearer_auth" = [])),
    tag = "line items"
)]
pub async fn delete_line_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.orders.delete_line_item(id).await?;
    Ok(no_content_response())
}
