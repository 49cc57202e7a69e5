use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::order::{self, Entity as Order};
use crate::entities::order_product::{self, Entity as OrderProduct};
use crate::entities::product::{self, Entity as Product};
use crate::errors::ServiceError;
use crate::services::catalog::ProductResponse;

/// Message used whenever the ownership predicate misses: absence and
/// foreign ownership must be indistinguishable to the caller.
const ORDER_NOT_FOUND: &str =
    "The requested order does not exist, or you do not have permission to access it.";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderInput {
    #[serde(default)]
    pub purchased: bool,
    pub created_date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderInput {
    pub purchased: bool,
    pub created_date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddLineItemInput {
    #[serde(rename = "productId")]
    pub product_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLineItemInput {
    #[serde(rename = "orderId")]
    pub order_id: i64,
    #[serde(rename = "productId")]
    pub product_id: i64,
}

/// Line item as nested inside an order: id plus the resolved product.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineItem {
    pub id: i64,
    pub product: ProductResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub customer: i64,
    pub purchased: bool,
    pub created_date: NaiveDate,
    pub lineitems: Vec<OrderLineItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummary {
    pub id: i64,
    pub customer: i64,
    pub purchased: bool,
    pub created_date: NaiveDate,
}

impl From<order::Model> for OrderSummary {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            customer: model.customer_id,
            purchased: model.purchased,
            created_date: model.created_date,
        }
    }
}

/// Standalone line-item projection with two levels of expansion.
#[derive(Debug, Serialize, ToSchema)]
pub struct LineItemResponse {
    pub id: i64,
    pub order: OrderSummary,
    pub product: ProductResponse,
}

/// Order aggregate: orders plus their line items. Reads and mutations of
/// orders run under the ownership predicate; line-item creation resolves
/// the acting customer's single open order.
pub struct OrderService {
    db: Arc<DbPool>,
}

impl OrderService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    async fn nested_line_items(&self, order_id: i64) -> Result<Vec<OrderLineItem>, ServiceError> {
        let rows = OrderProduct::find()
            .filter(order_product::Column::OrderId.eq(order_id))
            .find_also_related(Product)
            .order_by_asc(order_product::Column::Id)
            .all(&*self.db)
            .await?;

        rows.into_iter()
            .map(|(item, product)| {
                let product = product.ok_or_else(|| {
                    ServiceError::InternalError(format!(
                        "Line item {} references a missing product",
                        item.id
                    ))
                })?;
                Ok(OrderLineItem {
                    id: item.id,
                    product: product.into(),
                })
            })
            .collect()
    }

    async fn order_response(&self, model: order::Model) -> Result<OrderResponse, ServiceError> {
        let lineitems = self.nested_line_items(model.id).await?;
        Ok(OrderResponse {
            id: model.id,
            customer: model.customer_id,
            purchased: model.purchased,
            created_date: model.created_date,
            lineitems,
        })
    }

    fn owned_order(customer_id: i64, id: i64) -> sea_orm::Select<Order> {
        Order::find_by_id(id).filter(order::Column::CustomerId.eq(customer_id))
    }

    /// Rejects a write that would give the customer a second open order.
    /// `exclude` names the order being mutated, if any.
    async fn ensure_single_open_order(
        &self,
        customer_id: i64,
        exclude: Option<i64>,
    ) -> Result<(), ServiceError> {
        let mut query = Order::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .filter(order::Column::Purchased.eq(false));
        if let Some(id) = exclude {
            query = query.filter(order::Column::Id.ne(id));
        }

        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::Conflict(
                "This customer already has an open order".to_string(),
            ));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, customer_id: i64) -> Result<Vec<OrderResponse>, ServiceError> {
        let orders = Order::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_asc(order::Column::Id)
            .all(&*self.db)
            .await?;

        let mut responses = Vec::with_capacity(orders.len());
        for model in orders {
            responses.push(self.order_response(model).await?);
        }
        Ok(responses)
    }

    #[instrument(skip(self))]
    pub async fn get_order(
        &self,
        customer_id: i64,
        id: i64,
    ) -> Result<OrderResponse, ServiceError> {
        let model = Self::owned_order(customer_id, id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(ORDER_NOT_FOUND.to_string()))?;

        self.order_response(model).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_order(
        &self,
        customer_id: i64,
        input: CreateOrderInput,
    ) -> Result<OrderResponse, ServiceError> {
        if !input.purchased {
            self.ensure_single_open_order(customer_id, None).await?;
        }

        let model = order::ActiveModel {
            customer_id: Set(customer_id),
            purchased: Set(input.purchased),
            created_date: Set(input.created_date),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        self.order_response(model).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_order(
        &self,
        customer_id: i64,
        id: i64,
        input: UpdateOrderInput,
    ) -> Result<(), ServiceError> {
        let model = Self::owned_order(customer_id, id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(ORDER_NOT_FOUND.to_string()))?;

        if !input.purchased {
            self.ensure_single_open_order(customer_id, Some(model.id))
                .await?;
        }

        let mut active: order::ActiveModel = model.into();
        active.purchased = Set(input.purchased);
        active.created_date = Set(input.created_date);
        active.update(&*self.db).await?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, customer_id: i64, id: i64) -> Result<(), ServiceError> {
        let model = Self::owned_order(customer_id, id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(ORDER_NOT_FOUND.to_string()))?;

        model.delete(&*self.db).await?;
        Ok(())
    }

    /// Appends a line item to the acting customer's open order. Inventory
    /// is not touched.
    #[instrument(skip(self))]
    pub async fn add_line_item(
        &self,
        customer_id: i64,
        product_id: i64,
    ) -> Result<LineItemResponse, ServiceError> {
        let open_order = Order::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .filter(order::Column::Purchased.eq(false))
            .one(&*self.db)
            .await?
            .ok_or(ServiceError::NoOpenOrder)?;

        let product = Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "Line item references an unknown product ({product_id})"
                ))
            })?;

        let item = order_product::ActiveModel {
            order_id: Set(open_order.id),
            product_id: Set(product.id),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        Ok(LineItemResponse {
            id: item.id,
            order: open_order.into(),
            product: product.into(),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_line_item(&self, id: i64) -> Result<LineItemResponse, ServiceError> {
        let item = OrderProduct::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Line item with ID {id} not found")))?;

        self.line_item_response(item).await
    }

    #[instrument(skip(self))]
    pub async fn list_line_items(
        &self,
        order_id: Option<i64>,
    ) -> Result<Vec<LineItemResponse>, ServiceError> {
        let mut query = OrderProduct::find().order_by_asc(order_product::Column::Id);
        if let Some(order_id) = order_id {
            query = query.filter(order_product::Column::OrderId.eq(order_id));
        }
        let items = query.all(&*self.db).await?;

        let mut responses = Vec::with_capacity(items.len());
        for item in items {
            responses.push(self.line_item_response(item).await?);
        }
        Ok(responses)
    }

    /// Repoints a line item at a different order and product. Both
    /// referents must exist; the line item itself carries no customer, so
    /// there is no ownership check to make here.
    #[instrument(skip(self, input))]
    pub async fn update_line_item(
        &self,
        id: i64,
        input: UpdateLineItemInput,
    ) -> Result<(), ServiceError> {
        let item = OrderProduct::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Line item with ID {id} not found")))?;

        let order = Order::find_by_id(input.order_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "Line item references an unknown order ({})",
                    input.order_id
                ))
            })?;

        let product = Product::find_by_id(input.product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "Line item references an unknown product ({})",
                    input.product_id
                ))
            })?;

        let mut active: order_product::ActiveModel = item.into();
        active.order_id = Set(order.id);
        active.product_id = Set(product.id);
        active.update(&*self.db).await?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_line_item(&self, id: i64) -> Result<(), ServiceError> {
        let item = OrderProduct::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Line item with ID {id} not found")))?;

        item.delete(&*self.db).await?;
        Ok(())
    }

    async fn line_item_response(
        &self,
        item: order_product::Model,
    ) -> Result<LineItemResponse, ServiceError> {
        let order = Order::find_by_id(item.order_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "Line item {} references a missing order",
                    item.id
                ))
            })?;

        let product = Product::find_by_id(item.product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "Line item {} references a missing product",
                    item.id
                ))
            })?;

        Ok(LineItemResponse {
            id: item.id,
            order: order.into(),
            product: product.into(),
        })
    }
}
