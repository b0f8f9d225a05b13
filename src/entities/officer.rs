//! Officer entity - The contact person on record for a business customer.

use super::Blank;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Officer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "officer")]
pub struct Model {
    /// Officer ID, primary key
    #[sea_orm(primary_key)]
    pub officer_id: i32,
    /// Business customer this officer represents, at most one officer per customer
    #[sea_orm(unique)]
    pub cust_id: i32,
    /// First name
    #[sea_orm(column_type = "String(StringLen::N(30))")]
    pub fname: String,
    /// Last name
    #[sea_orm(column_type = "String(StringLen::N(30))")]
    pub lname: String,
    /// Title within the business, nullable
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub title: Option<String>,
    /// First day in the role
    pub start_date: Date,
    /// Last day in the role, None while still serving
    pub end_date: Option<Date>,
}

/// Defines relationships between Officer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each officer belongs to one business customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustId",
        to = "super::customer::Column::CustId"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Officer(officer_id={}, cust_id={}, fname={}, lname={}, title={}, start_date={}, end_date={})",
            self.officer_id,
            self.cust_id,
            self.fname,
            self.lname,
            Blank(self.title.as_deref()),
            self.start_date,
            Blank(self.end_date),
        )
    }
}
