//! Customer data access - customers, their extension rows and business officers.
//!
//! A customer row on its own is incomplete: the `cust_type_cd` column says whether the
//! rest of the record lives in `individual` or `business`. The functions here always
//! write the customer and its extension together, and [`load_customer_profile`]
//! reads them back as a single tagged value.

use crate::{
    entities::{
        Business, Customer, CustomerType, Individual, Officer, business, customer, individual,
        officer,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Columns shared by every customer, regardless of type
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    /// Federal id: SSN for individuals, EIN for businesses
    pub fed_id: String,
    /// Street address, nullable
    pub address: Option<String>,
    /// City, nullable
    pub city: Option<String>,
    /// State, nullable
    pub state: Option<String>,
    /// Postal code, nullable
    pub postal_code: Option<String>,
}

/// Extension columns for an individual customer
#[derive(Debug, Clone)]
pub struct NewIndividual {
    /// First name
    pub fname: String,
    /// Last name
    pub lname: String,
    /// Date of birth, nullable
    pub birth_date: Option<Date>,
}

/// Extension columns for a business customer
#[derive(Debug, Clone)]
pub struct NewBusiness {
    /// Registered business name
    pub name: String,
    /// State registration id
    pub state_id: String,
    /// Date of incorporation, nullable
    pub incorp_date: Option<Date>,
}

/// Officer of a business customer
#[derive(Debug, Clone)]
pub struct NewOfficer {
    /// Business customer the officer represents
    pub cust_id: i32,
    /// First name
    pub fname: String,
    /// Last name
    pub lname: String,
    /// Title within the business, nullable
    pub title: Option<String>,
    /// First day in the role
    pub start_date: Date,
    /// Last day in the role, None while still serving
    pub end_date: Option<Date>,
}

/// The extension record selected by a customer's type code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerDetails {
    /// `cust_type_cd = I`
    Individual(individual::Model),
    /// `cust_type_cd = B`
    Business(business::Model),
}

impl CustomerDetails {
    /// The type code this extension belongs under
    #[must_use]
    pub const fn customer_type(&self) -> CustomerType {
        match self {
            Self::Individual(_) => CustomerType::Individual,
            Self::Business(_) => CustomerType::Business,
        }
    }

    /// Display name: "first last" for individuals, the business name otherwise
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Individual(person) => format!("{} {}", person.fname, person.lname),
            Self::Business(company) => company.name.clone(),
        }
    }
}

/// A customer together with its extension row.
///
/// `details` is `None` when the extension row is missing, which the integrity
/// check reports as a violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerProfile {
    /// The customer row
    pub customer: customer::Model,
    /// Extension row selected by `cust_type_cd`, None if it is missing
    pub details: Option<CustomerDetails>,
}

impl CustomerProfile {
    /// Returns the individual extension, if this is an individual customer
    #[must_use]
    pub fn individual(&self) -> Option<&individual::Model> {
        match &self.details {
            Some(CustomerDetails::Individual(person)) => Some(person),
            _ => None,
        }
    }

    /// Returns the business extension, if this is a business customer
    #[must_use]
    pub fn business(&self) -> Option<&business::Model> {
        match &self.details {
            Some(CustomerDetails::Business(company)) => Some(company),
            _ => None,
        }
    }
}

async fn insert_customer<C: ConnectionTrait>(
    db: &C,
    new_customer: NewCustomer,
    cust_type_cd: CustomerType,
) -> Result<customer::Model> {
    let customer = customer::ActiveModel {
        fed_id: Set(new_customer.fed_id),
        cust_type_cd: Set(cust_type_cd),
        address: Set(new_customer.address),
        city: Set(new_customer.city),
        state: Set(new_customer.state),
        postal_code: Set(new_customer.postal_code),
        ..Default::default()
    };
    customer.insert(db).await.map_err(Into::into)
}

async fn insert_individual<C: ConnectionTrait>(
    db: &C,
    cust_id: i32,
    new_individual: NewIndividual,
) -> Result<individual::Model> {
    let individual = individual::ActiveModel {
        cust_id: Set(cust_id),
        fname: Set(new_individual.fname),
        lname: Set(new_individual.lname),
        birth_date: Set(new_individual.birth_date),
    };
    individual.insert(db).await.map_err(Into::into)
}

async fn insert_business<C: ConnectionTrait>(
    db: &C,
    cust_id: i32,
    new_business: NewBusiness,
) -> Result<business::Model> {
    let business = business::ActiveModel {
        cust_id: Set(cust_id),
        name: Set(new_business.name),
        state_id: Set(new_business.state_id),
        incorp_date: Set(new_business.incorp_date),
    };
    business.insert(db).await.map_err(Into::into)
}

/// Looks up a customer and checks that it has the expected type code.
async fn require_customer_type<C: ConnectionTrait>(
    db: &C,
    cust_id: i32,
    expected: CustomerType,
) -> Result<customer::Model> {
    let customer = Customer::find_by_id(cust_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("customer", cust_id))?;

    if customer.cust_type_cd != expected {
        return Err(Error::CustomerTypeMismatch {
            cust_id,
            expected,
            actual: customer.cust_type_cd,
        });
    }
    Ok(customer)
}

/// Creates an individual customer (`cust_type_cd = I`) and its `individual` row atomically.
#[instrument(skip(db, new_customer, new_individual))]
pub async fn create_individual_customer(
    db: &DatabaseConnection,
    new_customer: NewCustomer,
    new_individual: NewIndividual,
) -> Result<CustomerProfile> {
    let txn = db.begin().await?;

    let customer = insert_customer(&txn, new_customer, CustomerType::Individual).await?;
    let individual = insert_individual(&txn, customer.cust_id, new_individual).await?;

    txn.commit().await?;
    info!("Created individual customer {}", customer.cust_id);

    Ok(CustomerProfile {
        customer,
        details: Some(CustomerDetails::Individual(individual)),
    })
}

/// Creates a business customer (`cust_type_cd = B`) and its `business` row atomically.
#[instrument(skip(db, new_customer, new_business))]
pub async fn create_business_customer(
    db: &DatabaseConnection,
    new_customer: NewCustomer,
    new_business: NewBusiness,
) -> Result<CustomerProfile> {
    let txn = db.begin().await?;

    let customer = insert_customer(&txn, new_customer, CustomerType::Business).await?;
    let business = insert_business(&txn, customer.cust_id, new_business).await?;

    txn.commit().await?;
    info!("Created business customer {}", customer.cust_id);

    Ok(CustomerProfile {
        customer,
        details: Some(CustomerDetails::Business(business)),
    })
}

/// Adds the `individual` row to an existing customer of type `I`.
///
/// # Errors
/// Returns `Error::NotFound` if the customer does not exist and
/// `Error::CustomerTypeMismatch` if it is a business customer.
pub async fn attach_individual(
    db: &DatabaseConnection,
    cust_id: i32,
    new_individual: NewIndividual,
) -> Result<individual::Model> {
    require_customer_type(db, cust_id, CustomerType::Individual).await?;
    insert_individual(db, cust_id, new_individual).await
}

/// Adds the `business` row to an existing customer of type `B`.
///
/// # Errors
/// Returns `Error::NotFound` if the customer does not exist and
/// `Error::CustomerTypeMismatch` if it is an individual customer.
pub async fn attach_business(
    db: &DatabaseConnection,
    cust_id: i32,
    new_business: NewBusiness,
) -> Result<business::Model> {
    require_customer_type(db, cust_id, CustomerType::Business).await?;
    insert_business(db, cust_id, new_business).await
}

/// Records the officer of a business customer.
///
/// # Errors
/// Returns `Error::CustomerTypeMismatch` when the customer is an individual.
#[instrument(skip(db, new_officer), fields(cust_id = new_officer.cust_id))]
pub async fn add_officer(db: &DatabaseConnection, new_officer: NewOfficer) -> Result<officer::Model> {
    require_customer_type(db, new_officer.cust_id, CustomerType::Business).await?;

    let officer = officer::ActiveModel {
        cust_id: Set(new_officer.cust_id),
        fname: Set(new_officer.fname),
        lname: Set(new_officer.lname),
        title: Set(new_officer.title),
        start_date: Set(new_officer.start_date),
        end_date: Set(new_officer.end_date),
        ..Default::default()
    };
    let result = officer.insert(db).await?;
    info!("Added officer {} for customer {}", result.officer_id, result.cust_id);
    Ok(result)
}

/// Finds a customer by its primary key.
pub async fn get_customer_by_id(
    db: &DatabaseConnection,
    cust_id: i32,
) -> Result<Option<customer::Model>> {
    Customer::find_by_id(cust_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all customers ordered by id.
pub async fn get_all_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>> {
    Customer::find()
        .order_by_asc(customer::Column::CustId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the officer recorded for a customer, if any.
pub async fn get_officer_for_customer(
    db: &DatabaseConnection,
    cust_id: i32,
) -> Result<Option<officer::Model>> {
    Officer::find()
        .filter(officer::Column::CustId.eq(cust_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Resolves the extension row for an already loaded customer.
///
/// Only the table selected by `cust_type_cd` is consulted.
pub async fn resolve_details<C: ConnectionTrait>(
    db: &C,
    customer: &customer::Model,
) -> Result<Option<CustomerDetails>> {
    let details = match customer.cust_type_cd {
        CustomerType::Individual => Individual::find_by_id(customer.cust_id)
            .one(db)
            .await?
            .map(CustomerDetails::Individual),
        CustomerType::Business => Business::find_by_id(customer.cust_id)
            .one(db)
            .await?
            .map(CustomerDetails::Business),
    };
    Ok(details)
}

/// Loads a customer and its extension row as a [`CustomerProfile`].
///
/// # Errors
/// Returns `Error::NotFound` if the customer does not exist.
#[instrument(skip(db))]
pub async fn load_customer_profile<C: ConnectionTrait>(db: &C, cust_id: i32) -> Result<CustomerProfile> {
    let customer = Customer::find_by_id(cust_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("customer", cust_id))?;

    let details = resolve_details(db, &customer).await?;
    debug!(
        "Loaded customer {} with details: {:?}",
        cust_id,
        details.as_ref().map(CustomerDetails::customer_type)
    );

    Ok(CustomerProfile { customer, details })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_individual_customer_round_trip() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_individual_customer(
            &db,
            NewCustomer {
                fed_id: "111-11-1111".to_string(),
                address: Some("47 Mockingbird Ln".to_string()),
                city: Some("Lynnfield".to_string()),
                state: Some("MA".to_string()),
                postal_code: Some("01940".to_string()),
            },
            NewIndividual {
                fname: "James".to_string(),
                lname: "Hadley".to_string(),
                birth_date: chrono::NaiveDate::from_ymd_opt(1972, 4, 22),
            },
        )
        .await?;

        let loaded = load_customer_profile(&db, created.customer.cust_id).await?;
        assert_eq!(loaded, created);
        assert_eq!(loaded.customer.cust_type_cd, CustomerType::Individual);
        assert_eq!(loaded.individual().unwrap().lname, "Hadley");
        assert!(loaded.business().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_business_customer_round_trip() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_test_business(&db, "Chilton Engineering").await?;
        let loaded = load_customer_profile(&db, created.customer.cust_id).await?;

        assert_eq!(loaded, created);
        assert_eq!(loaded.customer.cust_type_cd, CustomerType::Business);
        assert_eq!(
            loaded.details.as_ref().map(CustomerDetails::display_name),
            Some("Chilton Engineering".to_string())
        );
        assert!(loaded.individual().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_attach_rejects_wrong_extension() -> Result<()> {
        let db = setup_test_db().await?;
        let person = create_test_individual(&db, "Jane", "Doe").await?;

        let result = attach_business(
            &db,
            person.customer.cust_id,
            NewBusiness {
                name: "Not A Business".to_string(),
                state_id: "00-000".to_string(),
                incorp_date: None,
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::CustomerTypeMismatch {
                expected: CustomerType::Business,
                actual: CustomerType::Individual,
                ..
            })
        ));
        assert!(Business::find_by_id(person.customer.cust_id).one(&db).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_attach_individual_to_bare_customer() -> Result<()> {
        let db = setup_test_db().await?;
        let bare = insert_customer(
            &db,
            NewCustomer {
                fed_id: "222-22-2222".to_string(),
                ..Default::default()
            },
            CustomerType::Individual,
        )
        .await?;

        let before = load_customer_profile(&db, bare.cust_id).await?;
        assert!(before.details.is_none());

        attach_individual(
            &db,
            bare.cust_id,
            NewIndividual {
                fname: "Susan".to_string(),
                lname: "Tingley".to_string(),
                birth_date: None,
            },
        )
        .await?;

        let after = load_customer_profile(&db, bare.cust_id).await?;
        assert_eq!(after.individual().unwrap().fname, "Susan");

        Ok(())
    }

    #[tokio::test]
    async fn test_attach_to_missing_customer() -> Result<()> {
        let db = setup_test_db().await?;
        let result = attach_individual(
            &db,
            999,
            NewIndividual {
                fname: "Nobody".to_string(),
                lname: "Here".to_string(),
                birth_date: None,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::NotFound { entity: "customer", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_officer_only_for_business_customers() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_business(&db, "AA Inc.").await?;
        let person = create_test_individual(&db, "Jane", "Doe").await?;
        let start = chrono::NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();

        let officer = add_officer(
            &db,
            NewOfficer {
                cust_id: company.customer.cust_id,
                fname: "Michael".to_string(),
                lname: "Chilton".to_string(),
                title: Some("President".to_string()),
                start_date: start,
                end_date: None,
            },
        )
        .await?;

        let fetched = get_officer_for_customer(&db, company.customer.cust_id).await?;
        assert_eq!(fetched, Some(officer));

        let rejected = add_officer(
            &db,
            NewOfficer {
                cust_id: person.customer.cust_id,
                fname: "Jane".to_string(),
                lname: "Doe".to_string(),
                title: None,
                start_date: start,
                end_date: None,
            },
        )
        .await;
        assert!(matches!(rejected, Err(Error::CustomerTypeMismatch { .. })));
        assert!(get_officer_for_customer(&db, person.customer.cust_id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_second_officer_rejected() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let company = create_test_business(&db, "AA Inc.").await?;
        let start = chrono::NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        let officer = |fname: &str| NewOfficer {
            cust_id: company.customer.cust_id,
            fname: fname.to_string(),
            lname: "Chilton".to_string(),
            title: Some("President".to_string()),
            start_date: start,
            end_date: None,
        };

        let first = add_officer(&db, officer("Michael")).await?;
        let second = add_officer(&db, officer("Paul")).await;
        assert!(matches!(second, Err(Error::Database(_))));

        assert_eq!(Officer::find().all(&db).await?, vec![first.clone()]);
        assert_eq!(get_officer_for_customer(&db, company.customer.cust_id).await?, Some(first));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_customers_ordered() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_individual(&db, "Frank", "Tucker").await?;
        let second = create_test_business(&db, "Southeastern Imports").await?;

        let all = get_all_customers(&db).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], first.customer);
        assert_eq!(all[1], second.customer);

        assert_eq!(get_customer_by_id(&db, 999).await?, None);
        assert!(matches!(
            load_customer_profile(&db, 999).await,
            Err(Error::NotFound { .. })
        ));

        Ok(())
    }
}
