//! Transaction entity - A single credit or debit posted against an account.
//!
//! `txn_type_cd` is either `CDT` (credit) or `DBT` (debit). The teller and the
//! executing branch are optional, since not every transaction happens at a counter.
//! Writing a transaction row does not change the account's balances.

use super::{Blank, iso_datetime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction type code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Credit
    #[sea_orm(string_value = "CDT")]
    Cdt,
    /// Debit
    #[sea_orm(string_value = "DBT")]
    Dbt,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cdt => "CDT",
            Self::Dbt => "DBT",
        })
    }
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction")]
pub struct Model {
    /// Transaction ID, primary key
    #[sea_orm(primary_key)]
    pub txn_id: i32,
    /// When the transaction happened
    pub txn_date: DateTime,
    /// Account the transaction was posted against
    #[sea_orm(indexed)]
    pub account_id: i32,
    /// Credit or debit, nullable
    pub txn_type_cd: Option<TransactionType>,
    /// Transaction amount in dollars
    pub amount: f64,
    /// Teller who handled the transaction, None if not handled by an employee
    #[sea_orm(indexed)]
    pub teller_emp_id: Option<i32>,
    /// Branch where the transaction was executed, None if not at a branch
    #[sea_orm(indexed)]
    pub execution_branch_id: Option<i32>,
    /// When the funds become available, nullable
    pub funds_avail_date: Option<DateTime>,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::AccountId"
    )]
    Account,
    /// Teller who handled the transaction
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::TellerEmpId",
        to = "super::employee::Column::EmpId"
    )]
    Teller,
    /// Branch that executed the transaction
    #[sea_orm(
        belongs_to = "super::branch::Entity",
        from = "Column::ExecutionBranchId",
        to = "super::branch::Column::BranchId"
    )]
    ExecutionBranch,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teller.def()
    }
}

impl Related<super::branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExecutionBranch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction(txn_id={}, txn_date={}, account_id={}, txn_type_cd={}, amount={:10.2}, \
             teller_emp_id={}, execution_branch_id={}, funds_avail_date={})",
            self.txn_id,
            iso_datetime(self.txn_date),
            self.account_id,
            Blank(self.txn_type_cd),
            self.amount,
            Blank(self.teller_emp_id),
            Blank(self.execution_branch_id),
            Blank(self.funds_avail_date.map(iso_datetime)),
        )
    }
}
