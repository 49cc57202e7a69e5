use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::user;
use crate::db::DbPool;
use crate::entities::customer::{self, Entity as Customer};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<user::Model> for AccountInfo {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerProfile {
    pub id: i64,
    pub phone_number: String,
    pub address: String,
    pub user: AccountInfo,
}

/// Contact-field update for the acting customer; also renames the linked
/// account.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileInput {
    pub last_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(max = 15, message = "Phone number must be at most 15 characters"))]
    pub phone_number: String,
    #[validate(length(max = 55, message = "Address must be at most 55 characters"))]
    pub address: String,
}

pub struct CustomerService {
    db: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Resolves the customer profile behind an authenticated account.
    /// Every ownership check in the API starts here.
    #[instrument(skip(self))]
    pub async fn profile_for_user(&self, user_id: i64) -> Result<customer::Model, ServiceError> {
        Customer::find()
            .filter(customer::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("No customer profile for this account".to_string())
            })
    }

    /// Returns the full customer directory with nested account info.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<CustomerProfile>, ServiceError> {
        let rows = Customer::find()
            .find_also_related(user::Entity)
            .order_by_asc(customer::Column::Id)
            .all(&*self.db)
            .await?;

        rows.into_iter()
            .map(|(profile, account)| {
                let account = account.ok_or_else(|| {
                    ServiceError::InternalError(format!(
                        "Customer {} has no linked account",
                        profile.id
                    ))
                })?;
                Ok(CustomerProfile {
                    id: profile.id,
                    phone_number: profile.phone_number,
                    address: profile.address,
                    user: account.into(),
                })
            })
            .collect()
    }

    /// Updates the acting customer's contact fields and the linked
    /// account's name/email in one transaction.
    #[instrument(skip(self, input))]
    pub async fn update_profile(
        &self,
        user_id: i64,
        input: UpdateProfileInput,
    ) -> Result<(), ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let profile = Customer::find()
            .filter(customer::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("No customer profile for this account".to_string())
            })?;

        let account = user::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!("Customer {} has no linked account", profile.id))
            })?;

        let mut account: user::ActiveModel = account.into();
        account.last_name = Set(input.last_name);
        account.email = Set(input.email);
        account.update(&txn).await?;

        let mut profile: customer::ActiveModel = profile.into();
        profile.phone_number = Set(input.phone_number);
        profile.address = Set(input.address);
        profile.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}
