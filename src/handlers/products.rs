use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::common::{
    created_response, no_content_response, success_response, validate_input,
};
use crate::services::catalog::{CreateProductInput, UpdateProductInput};
use crate::AppState;

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products", post(create_product))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}", put(update_product))
        .route("/products/{id}", delete(delete_product))
}

/// Browse the catalog
#[utoipa::path(
    get,
    path = "/products",
    responses((status = 200, description = "All products", body = [crate::services::catalog::ProductResponse])),
    tag = "products"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let products = state.services.catalog.list_products().await?;
    Ok(success_response(products))
}

/// Fetch one product
#[utoipa::path(
    get,
    path = "/products/{id}",
    responses(
        (status = 200, description = "The product", body = crate::services::catalog::ProductResponse),
        (status = 404, description = "Unknown product"),
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.catalog.get_product(id).await?;
    Ok(success_response(product))
}

/// List a product for sale, owned by the acting customer
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductInput,
    responses(
        (status = 201, description = "Product created", body = crate::services::catalog::ProductResponse),
        (status = 400, description = "Price or quantity out of bounds"),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let customer = state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    let product = state
        .services
        .catalog
        .create_product(customer.id, payload)
        .await?;
    Ok(created_response(product))
}

/// Update a product the acting customer owns
#[utoipa::path(
    put,
    path = "/products/{id}",
    request_body = UpdateProductInput,
    responses(
        (status = 204, description = "Product updated"),
        (status = 404, description = "Absent or owned by someone else"),
        (status = 400, description = "Price or quantity out of bounds"),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let customer = state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    state
        .services
        .catalog
        .update_product(customer.id, id, payload)
        .await?;
    Ok(no_content_response())
}

/// Remove a product the acting customer owns
#[utoipa::path(
    delete,
    path = "/products/{id}",
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Absent or owned by someone else"),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    state
        .services
        .catalog
        .delete_product(customer.id, id)
        .await?;
    Ok(no_content_response())
}
