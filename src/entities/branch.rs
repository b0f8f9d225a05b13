//! Branch entity - A physical location of the bank.
//!
//! Employees are assigned to a branch, accounts record the branch where they were
//! opened, and transactions record the branch that executed them.

use super::Blank;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Branch database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "branch")]
pub struct Model {
    /// Branch ID, primary key
    #[sea_orm(primary_key)]
    pub branch_id: i32,
    /// Name of the branch
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub name: String,
    /// Street address, nullable
    #[sea_orm(column_type = "String(StringLen::N(30))", nullable)]
    pub address: Option<String>,
    /// City, nullable
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub city: Option<String>,
    /// Two-letter state code, nullable
    #[sea_orm(column_type = "String(StringLen::N(2))", nullable)]
    pub state: Option<String>,
    /// ZIP code, nullable
    #[sea_orm(column_type = "String(StringLen::N(12))", nullable)]
    pub zip: Option<String>,
}

/// Defines relationships between Branch and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Employees assigned to this branch
    #[sea_orm(has_many = "super::employee::Entity")]
    Employees,
    /// Transactions executed at this branch
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
    /// Accounts opened at this branch
    #[sea_orm(has_many = "super::account::Entity")]
    Accounts,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
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
            "Branch(branch_id={}, name={}, address={}, city={}, state={}, zip={})",
            self.branch_id,
            self.name,
            Blank(self.address.as_deref()),
            Blank(self.city.as_deref()),
            Blank(self.state.as_deref()),
            Blank(self.zip.as_deref()),
        )
    }
}
