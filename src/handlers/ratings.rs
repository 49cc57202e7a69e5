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
use crate::handlers::common::{
    created_response, no_content_response, success_response, validate_input,
};
use crate::services::feedback::{CreateRatingInput, UpdateRatingInput};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FeedbackListQuery {
    /// Restrict to feedback joined to one product
    pub item: Option<i64>,
}

pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/ratings", get(list_ratings))
        .route("/ratings", post(create_rating))
        .route("/ratings/{id}", get(get_rating))
        .route("/ratings/{id}", put(update_rating))
        .route("/ratings/{id}", delete(delete_rating))
}

/// Rate a product. The rating and its product join are written atomically.
#[utoipa::path(
    post,
    path = "/ratings",
    request_body = CreateRatingInput,
    responses(
        (status = 201, description = "Rating created", body = crate::services::feedback::RatingResponse),
        (status = 400, description = "Score out of range or unknown product"),
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn create_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRatingInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    // Attribution is an API-layer concern: the profile lookup proves the
    // acting account has a customer, nothing about it is persisted.
    state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    let rating = state.services.feedback.create_rating(payload).await?;
    Ok(created_response(rating))
}

/// List ratings, optionally only those attached to one product
#[utoipa::path(
    get,
    path = "/ratings",
    params(FeedbackListQuery),
    responses((status = 200, description = "Ratings", body = [crate::services::feedback::RatingResponse])),
    tag = "ratings"
)]
pub async fn list_ratings(
    State(state): State<AppState>,
    Query(query): Query<FeedbackListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let ratings = state.services.feedback.list_ratings(query.item).await?;
    Ok(success_response(ratings))
}

/// Fetch one rating
#[utoipa::path(
    get,
    path = "/ratings/{id}",
    responses(
        (status = 200, description = "The rating", body = crate::services::feedback::RatingResponse),
        (status = 404, description = "Unknown rating"),
    ),
    tag = "ratings"
)]
pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let rating = state.services.feedback.get_rating(id).await?;
    Ok(success_response(rating))
}

/// Change a rating's score
#[utoipa::path(
    put,
    path = "/ratings/{id}",
    request_body = UpdateRatingInput,
    responses(
        (status = 204, description = "Rating updated"),
        (status = 404, description = "Unknown rating"),
        (status = 400, description = "Score out of range"),
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn update_rating(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRatingInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    state.services.feedback.update_rating(id, payload).await?;
    Ok(no_content_response())
}

/// Delete a rating and its product joins
#[utoipa::path(
    delete,
    path = "/ratings/{id}",
    responses(
        (status = 204, description = "Rating deleted"),
        (status = 404, description = "Unknown rating"),
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn delete_rating(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.feedback.delete_rating(id).await?;
    Ok(no_content_response())
}
