//! Customer entity - The root record for every bank customer.
//!
//! A customer is either an individual (`I`) or a business (`B`). The type code
//! selects which extension table, `individual` or `business`, carries the rest
//! of the customer's details. Business customers may also have an officer.

use super::Blank;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer type code: individual `I` or business `B`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum CustomerType {
    /// Individual customer, extended by the `individual` table
    #[sea_orm(string_value = "I")]
    #[serde(rename = "I")]
    Individual,
    /// Business customer, extended by the `business` table
    #[sea_orm(string_value = "B")]
    #[serde(rename = "B")]
    Business,
}

impl CustomerType {
    /// The code stored in `cust_type_cd`
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Individual => "I",
            Self::Business => "B",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    /// Customer ID, primary key
    #[sea_orm(primary_key)]
    pub cust_id: i32,
    /// Federal ID (SSN or EIN)
    #[sea_orm(column_type = "String(StringLen::N(12))")]
    pub fed_id: String,
    /// Selects the extension table for this customer
    pub cust_type_cd: CustomerType,
    /// Street address, nullable
    #[sea_orm(column_type = "String(StringLen::N(30))", nullable)]
    pub address: Option<String>,
    /// City, nullable
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub city: Option<String>,
    /// State, nullable
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub state: Option<String>,
    /// Postal code, nullable
    #[sea_orm(column_type = "String(StringLen::N(10))", nullable)]
    pub postal_code: Option<String>,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many accounts
    #[sea_orm(has_many = "super::account::Entity")]
    Accounts,
    /// Individual extension row, present when the type code is `I`
    #[sea_orm(has_one = "super::individual::Entity")]
    Individual,
    /// Business extension row, present when the type code is `B`
    #[sea_orm(has_one = "super::business::Entity")]
    Business,
    /// Officer of a business customer
    #[sea_orm(has_one = "super::officer::Entity")]
    Officer,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::individual::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Individual.def()
    }
}

impl Related<super::business::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Business.def()
    }
}

impl Related<super::officer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Officer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer(cust_id={}, fed_id={}, cust_type_cd={}, address={}, city={}, state={}, postal_code={})",
            self.cust_id,
            self.fed_id,
            self.cust_type_cd,
            Blank(self.address.as_deref()),
            Blank(self.city.as_deref()),
            Blank(self.state.as_deref()),
            Blank(self.postal_code.as_deref()),
        )
    }
}
