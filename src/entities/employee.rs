//! Employee entity - Bank staff, organized in a superior/subordinate tree.
//!
//! `superior_emp_id` points back into the same table. Because a self-referencing
//! relation cannot be expressed as `Related<Entity> for Entity`, the superior edge is
//! exposed through [`SuperiorLink`]; subordinates are found by filtering on the
//! indexed `superior_emp_id` column. See `core::org_chart` for the in-memory tree.

use super::Blank;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    /// Employee ID, primary key
    #[sea_orm(primary_key)]
    pub emp_id: i32,
    /// First name
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub fname: String,
    /// Last name
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub lname: String,
    /// First day of employment
    pub start_date: Date,
    /// Last day of employment, None while still employed
    pub end_date: Option<Date>,
    /// Superior employee, None at the top of the tree
    #[sea_orm(indexed)]
    pub superior_emp_id: Option<i32>,
    /// Department, nullable
    #[sea_orm(indexed)]
    pub dept_id: Option<i32>,
    /// Job title, nullable
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub title: Option<String>,
    /// Assigned branch, nullable
    #[sea_orm(indexed)]
    pub assigned_branch_id: Option<i32>,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Superior employee (self reference)
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::SuperiorEmpId",
        to = "Column::EmpId"
    )]
    Superior,
    /// Each employee belongs to at most one department
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DeptId",
        to = "super::department::Column::DeptId"
    )]
    Department,
    /// Each employee is assigned to at most one branch
    #[sea_orm(
        belongs_to = "super::branch::Entity",
        from = "Column::AssignedBranchId",
        to = "super::branch::Column::BranchId"
    )]
    Branch,
    /// Transactions handled as teller
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
    /// Accounts opened by this employee
    #[sea_orm(has_many = "super::account::Entity")]
    OpenedAccounts,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branch.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpenedAccounts.def()
    }
}

/// Link from an employee to their superior
#[derive(Debug)]
pub struct SuperiorLink;

impl Linked for SuperiorLink {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::Superior.def()]
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Employee(emp_id={}, fname={}, lname={}, start_date={}, end_date={}, superior_emp_id={}, \
             dept_id={}, title={}, assigned_branch_id={})",
            self.emp_id,
            self.fname,
            self.lname,
            self.start_date,
            Blank(self.end_date),
            Blank(self.superior_emp_id),
            Blank(self.dept_id),
            Blank(self.title.as_deref()),
            Blank(self.assigned_branch_id),
        )
    }
}
