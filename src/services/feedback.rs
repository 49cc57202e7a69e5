use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::product::Entity as Product;
use crate::entities::product_rating;
use crate::entities::product_review;
use crate::entities::rating::{self, Entity as Rating};
use crate::entities::review::{self, Entity as Review};
use crate::errors::ServiceError;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRatingInput {
    #[validate(range(min = 0, max = 5, message = "Score must be between 0 and 5"))]
    pub score: i32,
    #[serde(rename = "productId")]
    pub product_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRatingInput {
    #[validate(range(min = 0, max = 5, message = "Score must be between 0 and 5"))]
    pub score: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewInput {
    #[validate(length(min = 1, max = 255, message = "Description must be 1 to 255 characters"))]
    pub description: String,
    #[serde(rename = "productId")]
    pub product_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewInput {
    #[validate(length(min = 1, max = 255, message = "Description must be 1 to 255 characters"))]
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingResponse {
    pub id: i64,
    pub score: i32,
}

impl From<rating::Model> for RatingResponse {
    fn from(model: rating::Model) -> Self {
        Self {
            id: model.id,
            score: model.score,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    pub description: String,
}

impl From<review::Model> for ReviewResponse {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
        }
    }
}

/// Ratings and reviews and their product joins. Creation writes the
/// feedback row and its join row in one transaction; an unknown product
/// rolls the whole operation back, so no orphaned feedback can remain.
pub struct FeedbackService {
    db: Arc<DbPool>,
}

impl FeedbackService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(product_id = input.product_id))]
    pub async fn create_rating(
        &self,
        input: CreateRatingInput,
    ) -> Result<RatingResponse, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let product = Product::find_by_id(input.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "Rating references an unknown product ({})",
                    input.product_id
                ))
            })?;

        let rating = rating::ActiveModel {
            score: Set(input.score),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        product_rating::ActiveModel {
            product_id: Set(product.id),
            rating_id: Set(rating.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(rating.into())
    }

    /// All ratings, or only those joined to the given product.
    #[instrument(skip(self))]
    pub async fn list_ratings(
        &self,
        item: Option<i64>,
    ) -> Result<Vec<RatingResponse>, ServiceError> {
        let mut query = Rating::find().order_by_asc(rating::Column::Id);
        if let Some(product_id) = item {
            query = query
                .join(JoinType::InnerJoin, rating::Relation::ProductRatings.def())
                .filter(product_rating::Column::ProductId.eq(product_id));
        }
        let ratings = query.all(&*self.db).await?;

        Ok(ratings.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_rating(&self, id: i64) -> Result<RatingResponse, ServiceError> {
        let model = Rating::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Rating with ID {id} not found")))?;

        Ok(model.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_rating(
        &self,
        id: i64,
        input: UpdateRatingInput,
    ) -> Result<(), ServiceError> {
        input.validate()?;

        let model = Rating::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Rating with ID {id} not found")))?;

        let mut active: rating::ActiveModel = model.into();
        active.score = Set(input.score);
        active.update(&*self.db).await?;

        Ok(())
    }

    /// Deletes the rating; its join rows go with it.
    #[instrument(skip(self))]
    pub async fn delete_rating(&self, id: i64) -> Result<(), ServiceError> {
        let model = Rating::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Rating with ID {id} not found")))?;

        let txn = self.db.begin().await?;
        product_rating::Entity::delete_many()
            .filter(product_rating::Column::RatingId.eq(model.id))
            .exec(&txn)
            .await?;
        model.delete(&txn).await?;
        txn.commit().await?;

        Ok(())
    }

    #[instrument(skip(self, input), fields(product_id = input.product_id))]
    pub async fn create_review(
        &self,
        input: CreateReviewInput,
    ) -> Result<ReviewResponse, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let product = Product::find_by_id(input.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "Review references an unknown product ({})",
                    input.product_id
                ))
            })?;

        let review = review::ActiveModel {
            description: Set(input.description),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        product_review::ActiveModel {
            product_id: Set(product.id),
            review_id: Set(review.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(review.into())
    }

    #[instrument(skip(self))]
    pub async fn list_reviews(
        &self,
        item: Option<i64>,
    ) -> Result<Vec<ReviewResponse>, ServiceError> {
        let mut query = Review::find().order_by_asc(review::Column::Id);
        if let Some(product_id) = item {
            query = query
                .join(JoinType::InnerJoin, review::Relation::ProductReviews.def())
                .filter(product_review::Column::ProductId.eq(product_id));
        }
        let reviews = query.all(&*self.db).await?;

        Ok(reviews.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_review(&self, id: i64) -> Result<ReviewResponse, ServiceError> {
        let model = Review::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Review with ID {id} not found")))?;

        Ok(model.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_review(
        &self,
        id: i64,
        input: UpdateReviewInput,
    ) -> Result<(), ServiceError> {
        input.validate()?;

        let model = Review::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Review with ID {id} not found")))?;

        let mut active: review::ActiveModel = model.into();
        active.description = Set(input.description);
        active.update(&*self.db).await?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: i64) -> Result<(), ServiceError> {
        let model = Review::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Review with ID {id} not found")))?;

        let txn = self.db.begin().await?;
        product_review::Entity::delete_many()
            .filter(product_review::Column::ReviewId.eq(model.id))
            .exec(&txn)
            .await?;
        model.delete(&txn).await?;
        txn.commit().await?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn validate_score(score: i32) -> bool {
        UpdateRatingInput { score }.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds_are_inclusive() {
        assert!(FeedbackService::validate_score(0));
        assert!(FeedbackService::validate_score(5));
        assert!(!FeedbackService::validate_score(6));
        assert!(!FeedbackService::validate_score(-1));
    }

    #[test]
    fn review_description_length_is_bounded() {
        let too_long = CreateReviewInput {
            description: "x".repeat(256),
            product_id: 1,
        };
        assert!(too_long.validate().is_err());
    }
}
