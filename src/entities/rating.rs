use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Numeric feedback, 0 to 5. Attribution to the submitting customer is an
/// API-layer concern only and is not persisted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub score: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_rating::Entity")]
    ProductRatings,
}

impl Related<super::product_rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductRatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
