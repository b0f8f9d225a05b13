//! Account entity - A product held by a customer.
//!
//! Each account belongs to one customer and one product, and records the employee
//! and branch that opened it. Balances are plain floating point columns; nothing
//! in this layer recomputes them when transactions are written.

use super::Blank;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    /// Open for activity
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Closed, see `close_date`
    #[sea_orm(string_value = "CLOSED")]
    Closed,
    /// Open but blocked from activity
    #[sea_orm(string_value = "FROZEN")]
    Frozen,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "ACTIVE",
            Self::Closed => "CLOSED",
            Self::Frozen => "FROZEN",
        })
    }
}

/// Account database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    /// Account ID, primary key
    #[sea_orm(primary_key)]
    pub account_id: i32,
    /// Product this account is an instance of
    #[sea_orm(column_type = "String(StringLen::N(10))", indexed)]
    pub product_cd: String,
    /// Owning customer
    #[sea_orm(indexed)]
    pub cust_id: i32,
    /// Date the account was opened
    pub open_date: Date,
    /// Date the account was closed, None while open
    pub close_date: Option<Date>,
    /// Date of the most recent activity, nullable
    pub last_activity_date: Option<Date>,
    /// Account status
    pub status: AccountStatus,
    /// Employee who opened the account, nullable
    #[sea_orm(indexed)]
    pub open_emp_id: Option<i32>,
    /// Branch where the account was opened, nullable
    #[sea_orm(indexed)]
    pub open_branch_id: Option<i32>,
    /// Available balance in dollars, nullable
    pub avail_balance: Option<f64>,
    /// Pending balance in dollars, nullable
    pub pending_balance: Option<f64>,
}

/// Defines relationships between Account and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each account is an instance of one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductCd",
        to = "super::product::Column::ProductCd"
    )]
    Product,
    /// Each account belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustId",
        to = "super::customer::Column::CustId"
    )]
    Customer,
    /// Employee who opened the account
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::OpenEmpId",
        to = "super::employee::Column::EmpId"
    )]
    OpenEmployee,
    /// Branch where the account was opened
    #[sea_orm(
        belongs_to = "super::branch::Entity",
        from = "Column::OpenBranchId",
        to = "super::branch::Column::BranchId"
    )]
    OpenBranch,
    /// One account has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpenEmployee.def()
    }
}

impl Related<super::branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpenBranch.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account(account_id={}, product_cd={}, cust_id={}, open_date={}, close_date={}, \
             last_activity_date={}, status={}, open_emp_id={}, open_branch_id={}, \
             avail_balance={}, pending_balance={})",
            self.account_id,
            self.product_cd,
            self.cust_id,
            self.open_date,
            Blank(self.close_date),
            Blank(self.last_activity_date),
            self.status,
            Blank(self.open_emp_id),
            Blank(self.open_branch_id),
            Blank(self.avail_balance.map(|b| format!("{b:.2}"))),
            Blank(self.pending_balance.map(|b| format!("{b:.2}"))),
        )
    }
}
