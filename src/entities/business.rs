//! Business entity - Corporate details for customers of type `B`.

use super::Blank;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Business customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "business")]
pub struct Model {
    /// Customer ID, primary key and foreign key to `customer`
    #[sea_orm(primary_key, auto_increment = false)]
    pub cust_id: i32,
    /// Registered business name
    #[sea_orm(column_type = "String(StringLen::N(40))")]
    pub name: String,
    /// State registration ID
    #[sea_orm(column_type = "String(StringLen::N(10))")]
    pub state_id: String,
    /// Incorporation date, nullable
    pub incorp_date: Option<Date>,
}

/// Defines relationships between Business and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each business extends exactly one customer
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
            "Business(cust_id={}, name={}, state_id={}, incorp_date={})",
            self.cust_id,
            self.name,
            self.state_id,
            Blank(self.incorp_date),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_iso_incorporation_date() {
        let business = Model {
            cust_id: 10,
            name: "Chilton Engineering".to_string(),
            state_id: "12-345-678".to_string(),
            incorp_date: chrono::NaiveDate::from_ymd_opt(1995, 5, 1),
        };
        assert_eq!(
            business.to_string(),
            "Business(cust_id=10, name=Chilton Engineering, state_id=12-345-678, incorp_date=1995-05-01)"
        );

        let unincorporated = Model {
            incorp_date: None,
            ..business
        };
        assert!(unincorporated.to_string().ends_with("incorp_date=)"));
    }
}
