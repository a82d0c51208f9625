//! `SeaORM` Entity for the `product_performance` aggregate view.
//!
//! Read-only: the view aggregates sales joined to products into per-product
//! revenue and profit totals. Never insert or update through this entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "product_performance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
