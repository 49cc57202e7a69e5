use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::common::{
    created_response, no_content_response, success_response, validate_input,
};
use crate::handlers::ratings::FeedbackListQuery;
use crate::services::feedback::{CreateReviewInput, UpdateReviewInput};
use crate::AppState;

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(list_reviews))
        .route("/reviews", post(create_review))
        .route("/reviews/{id}", get(get_review))
        .route("/reviews/{id}", put(update_review))
        .route("/reviews/{id}", delete(delete_review))
}

/// Review a product. The review and its product join are written atomically.
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewInput,
    responses(
        (status = 201, description = "Review created", body = crate::services::feedback::ReviewResponse),
        (status = 400, description = "Description too long or unknown product"),
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateReviewInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    state
        .services
        .customers
        .profile_for_user(user.user_id)
        .await?;
    let review = state.services.feedback.create_review(payload).await?;
    Ok(created_response(review))
}

/// List reviews, optionally only those attached to one product
#[utoipa::path(
    get,
    path = "/reviews",
    params(FeedbackListQuery),
    responses((status = 200, description = "Reviews", body = [crate::services::feedback::ReviewResponse])),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<FeedbackListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let reviews = state.services.feedback.list_reviews(query.item).await?;
    Ok(success_response(reviews))
}

/// Fetch one review
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    responses(
        (status = 200, description = "The review", body = crate::services::feedback::ReviewResponse),
        (status = 404, description = "Unknown review"),
    ),
    tag = "reviews"
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let review = state.services.feedback.get_review(id).await?;
    Ok(success_response(review))
}

/// Rewrite a review's text
#[utoipa::path(
    put,
    path = "/reviews/{id}",
    request_body = UpdateReviewInput,
    responses(
        (status = 204, description = "Review updated"),
        (status = 404, description = "Unknown review"),
        (status = 400, description = "Description too long"),
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn update_review(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReviewInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    state.services.feedback.update_review(id, payload).await?;
    Ok(no_content_response())
}

/// Delete a review and its product joins
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Unknown review"),
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.feedback.delete_review(id).await?;
    Ok(no_content_response())
}
