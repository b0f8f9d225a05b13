//! Product entity - A product offered by the bank (checking, savings, loans, ...).
//!
//! Products are keyed by a short code and belong to a product type. A product is
//! retired by setting `date_retired`; retired products keep their accounts.

use super::Blank;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    /// Product code, primary key (e.g. `"CHK"`)
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_type = "String(StringLen::N(10))"
    )]
    pub product_cd: String,
    /// Human-readable name
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub name: String,
    /// Product type this product belongs to
    #[sea_orm(column_type = "String(StringLen::N(10))", indexed)]
    pub product_type_cd: String,
    /// Date the product was first offered, nullable
    pub date_offered: Option<Date>,
    /// Date the product was retired, nullable
    pub date_retired: Option<Date>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one product type
    #[sea_orm(
        belongs_to = "super::product_type::Entity",
        from = "Column::ProductTypeCd",
        to = "super::product_type::Column::ProductTypeCd"
    )]
    ProductType,
    /// One product has many accounts
    #[sea_orm(has_many = "super::account::Entity")]
    Accounts,
}

impl Related<super::product_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductType.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product(product_cd={}, name={}, product_type_cd={}, date_offered={}, date_retired={})",
            self.product_cd,
            self.name,
            self.product_type_cd,
            Blank(self.date_offered),
            Blank(self.date_retired),
        )
    }
}
