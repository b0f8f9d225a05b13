//! Individual entity - Personal details for customers of type `I`.
//!
//! The primary key is also the foreign key to `customer`, so a customer has at most
//! one individual row.

use super::Blank;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Individual customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "individual")]
pub struct Model {
    /// Customer ID, primary key and foreign key to `customer`
    #[sea_orm(primary_key, auto_increment = false)]
    pub cust_id: i32,
    /// First name
    #[sea_orm(column_type = "String(StringLen::N(30))")]
    pub fname: String,
    /// Last name
    #[sea_orm(column_type = "String(StringLen::N(30))")]
    pub lname: String,
    /// Birth date, nullable
    pub birth_date: Option<Date>,
}

/// Defines relationships between Individual and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each individual extends exactly one customer
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
            "Individual(cust_id={}, fname={}, lname={}, birthdate={})",
            self.cust_id,
            self.fname,
            self.lname,
            Blank(self.birth_date),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_birthdate_label() {
        let person = Model {
            cust_id: 1,
            fname: "James".to_string(),
            lname: "Hadley".to_string(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1972, 4, 22),
        };
        assert_eq!(
            person.to_string(),
            "Individual(cust_id=1, fname=James, lname=Hadley, birthdate=1972-04-22)"
        );

        let unknown = Model {
            birth_date: None,
            ..person
        };
        assert_eq!(
            unknown.to_string(),
            "Individual(cust_id=1, fname=James, lname=Hadley, birthdate=)"
        );
    }
}
