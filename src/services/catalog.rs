use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::product::{self, Entity as Product};
use crate::errors::ServiceError;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, max = 10000.0, message = "Price must be between 0.00 and 10000.00"))]
    pub price: f64,
    #[validate(length(max = 555, message = "Description must be at most 555 characters"))]
    pub description: String,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,
    pub image_path: Option<String>,
}

/// Full-replace update; `created_date` is immutable and not accepted here.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, max = 10000.0, message = "Price must be between 0.00 and 10000.00"))]
    pub price: f64,
    #[validate(length(max = 555, message = "Description must be at most 555 characters"))]
    pub description: String,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub quantity: i32,
    pub created_date: NaiveDate,
    pub image_path: Option<String>,
    pub customer_id: i64,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            description: model.description,
            quantity: model.quantity,
            created_date: model.created_date,
            image_path: model.image_path,
            customer_id: model.customer_id,
        }
    }
}

/// Catalog operations. Writes are attributed to the acting customer;
/// update and delete run under the ownership predicate, so a foreign
/// product is indistinguishable from a missing one.
pub struct CatalogService {
    db: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let products = Product::find()
            .order_by_asc(product::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(products.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> Result<ProductResponse, ServiceError> {
        let model = Product::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with ID {id} not found")))?;

        Ok(model.into())
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(
        &self,
        customer_id: i64,
        input: CreateProductInput,
    ) -> Result<ProductResponse, ServiceError> {
        input.validate()?;

        let model = product::ActiveModel {
            customer_id: Set(customer_id),
            name: Set(input.name),
            price: Set(input.price),
            description: Set(input.description),
            quantity: Set(input.quantity),
            created_date: Set(Utc::now().date_naive()),
            image_path: Set(input.image_path),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        Ok(model.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        customer_id: i64,
        id: i64,
        input: UpdateProductInput,
    ) -> Result<(), ServiceError> {
        input.validate()?;

        let model = Product::find_by_id(id)
            .filter(product::Column::CustomerId.eq(customer_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with ID {id} not found")))?;

        let mut active: product::ActiveModel = model.into();
        active.name = Set(input.name);
        active.price = Set(input.price);
        active.description = Set(input.description);
        active.quantity = Set(input.quantity);
        active.image_path = Set(input.image_path);
        active.update(&*self.db).await?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, customer_id: i64, id: i64) -> Result<(), ServiceError> {
        let model = Product::find_by_id(id)
            .filter(product::Column::CustomerId.eq(customer_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with ID {id} not found")))?;

        model.delete(&*self.db).await?;
        Ok(())
    }
}
