//! Entity module - Contains all SeaORM entity definitions for the bank schema.
//! Each table has a Model struct for data and an Entity struct for operations.
//! Foreign keys are declared as `belongs_to` relations on the owning side; the
//! reverse direction is a `has_many`/`has_one` relation over an indexed column.

pub mod account;
pub mod branch;
pub mod business;
pub mod customer;
pub mod department;
pub mod employee;
pub mod individual;
pub mod officer;
pub mod product;
pub mod product_type;
pub mod transaction;

use std::fmt;

// Re-export specific types to avoid conflicts
pub use account::{
    AccountStatus, Column as AccountColumn, Entity as Account, Model as AccountModel,
};
pub use branch::{Column as BranchColumn, Entity as Branch, Model as BranchModel};
pub use business::{Column as BusinessColumn, Entity as Business, Model as BusinessModel};
pub use customer::{
    Column as CustomerColumn, CustomerType, Entity as Customer, Model as CustomerModel,
};
pub use department::{
    Column as DepartmentColumn, Entity as Department, Model as DepartmentModel,
};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use individual::{
    Column as IndividualColumn, Entity as Individual, Model as IndividualModel,
};
pub use officer::{Column as OfficerColumn, Entity as Officer, Model as OfficerModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_type::{
    Column as ProductTypeColumn, Entity as ProductType, Model as ProductTypeModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
    TransactionType,
};

/// Renders an optional column for debug output, printing nothing when it is NULL.
pub(crate) struct Blank<T>(pub(crate) Option<T>);

impl<T: fmt::Display> fmt::Display for Blank<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => Ok(()),
        }
    }
}

/// ISO-8601 rendering of a timestamp column (`2020-01-01T09:30:00`).
pub(crate) fn iso_datetime(value: chrono::NaiveDateTime) -> impl fmt::Display {
    value.format("%Y-%m-%dT%H:%M:%S%.f")
}
