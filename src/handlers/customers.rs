use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::common::{no_content_response, success_response, validate_input};
use crate::services::customers::UpdateProfileInput;
use crate::AppState;

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/{id}", put(update_customer))
}

/// List the customer directory
#[utoipa::path(
    get,
    path = "/customers",
    responses((status = 200, description = "All customer profiles", body = [crate::services::customers::CustomerProfile])),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let customers = state.services.customers.list_customers().await?;
    Ok(success_response(customers))
}

/// Update the acting customer's contact fields and account name/email.
/// The path id is accepted for REST symmetry; the profile is always
/// resolved from the authenticated identity.
#[utoipa::path(
    put,
    path = "/customers/{id}",
    request_body = UpdateProfileInput,
    responses(
        (status = 204, description = "Profile updated"),
        (status = 404, description = "No profile for this account"),
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(_id): Path<i64>,
    Json(payload): Json<UpdateProfileInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    state
        .services
        .customers
        .update_profile(user.user_id, payload)
        .await?;
    Ok(no_content_response())
}
