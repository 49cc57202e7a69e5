use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{LoginInput, RegisterInput};
use crate::errors::ServiceError;
use crate::handlers::common::{created_response, success_response};
use crate::AppState;

/// Login outcome. Bad credentials are reported with `valid: false` and a
/// 200, never a 401, so callers cannot probe for usernames.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Create an account with its customer profile and return the first token
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterInput,
    responses(
        (status = 201, description = "Account created", body = crate::auth::IssuedToken),
        (status = 400, description = "Invalid fields"),
        (status = 409, description = "Username already taken"),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let issued = state.auth.register(payload).await?;
    Ok(created_response(issued))
}

/// Verify credentials and return a bearer token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginInput,
    responses((status = 200, description = "Login attempt outcome", body = LoginResponse)),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let response = match state.auth.login(payload).await? {
        Some(issued) => LoginResponse {
            valid: true,
            token: Some(issued.token),
            id: Some(issued.id),
        },
        None => LoginResponse {
            valid: false,
            token: None,
            id: None,
        },
    };

    Ok(success_response(response))
}
