//! Shared test utilities for the bank model.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        account::{self, NewAccount},
        customer::{self, CustomerProfile, NewBusiness, NewCustomer, NewIndividual},
        organization::{self, NewBranch, NewEmployee},
        product::{self, NewProduct},
        transaction::{self, NewTransaction},
    },
    entities::{self, TransactionType},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Product type used by [`create_test_product`]
pub const TEST_PRODUCT_TYPE: &str = "ACCOUNT";

/// Installs a tracing subscriber that writes through the test harness.
/// Safe to call from several tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

#[allow(clippy::unwrap_used)]
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates an individual customer.
///
/// # Defaults
/// * `fed_id`: `"111-11-1111"`
/// * `city`: `"Lynnfield"`, `state`: `"MA"`
/// * `birth_date`: 1972-04-22
pub async fn create_test_individual(
    db: &DatabaseConnection,
    fname: &str,
    lname: &str,
) -> Result<CustomerProfile> {
    customer::create_individual_customer(
        db,
        NewCustomer {
            fed_id: "111-11-1111".to_string(),
            city: Some("Lynnfield".to_string()),
            state: Some("MA".to_string()),
            ..Default::default()
        },
        NewIndividual {
            fname: fname.to_string(),
            lname: lname.to_string(),
            birth_date: Some(date(1972, 4, 22)),
        },
    )
    .await
}

/// Creates a business customer.
///
/// # Defaults
/// * `fed_id`: `"04-1111111"`
/// * `state_id`: `"12-345-678"`
/// * `incorp_date`: 1995-05-01
pub async fn create_test_business(db: &DatabaseConnection, name: &str) -> Result<CustomerProfile> {
    customer::create_business_customer(
        db,
        NewCustomer {
            fed_id: "04-1111111".to_string(),
            city: Some("Wilmington".to_string()),
            state: Some("MA".to_string()),
            ..Default::default()
        },
        NewBusiness {
            name: name.to_string(),
            state_id: "12-345-678".to_string(),
            incorp_date: Some(date(1995, 5, 1)),
        },
    )
    .await
}

/// Creates a test product under [`TEST_PRODUCT_TYPE`], creating the type on first use.
pub async fn create_test_product(
    db: &DatabaseConnection,
    product_cd: &str,
) -> Result<entities::product::Model> {
    if product::get_product_type_by_code(db, TEST_PRODUCT_TYPE).await?.is_none() {
        product::create_product_type(db, TEST_PRODUCT_TYPE.to_string(), "Customer Accounts".to_string())
            .await?;
    }
    create_custom_product(db, product_cd, &format!("{product_cd} product"), TEST_PRODUCT_TYPE).await
}

/// Creates a product with a custom name and type. The type must exist.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    product_cd: &str,
    name: &str,
    product_type_cd: &str,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        NewProduct {
            product_cd: product_cd.to_string(),
            name: name.to_string(),
            product_type_cd: product_type_cd.to_string(),
            date_offered: Some(date(2000, 1, 1)),
            date_retired: None,
        },
    )
    .await
}

/// Opens an account for a customer.
///
/// # Defaults
/// * `open_date`: 2020-01-01
/// * `avail_balance`: 100.0, `pending_balance`: 100.0
/// * no opening employee or branch
pub async fn create_test_account(
    db: &DatabaseConnection,
    cust_id: i32,
    product_cd: &str,
) -> Result<entities::account::Model> {
    account::create_account(
        db,
        NewAccount {
            product_cd: product_cd.to_string(),
            cust_id,
            open_date: date(2020, 1, 1),
            open_emp_id: None,
            open_branch_id: None,
            avail_balance: Some(100.0),
            pending_balance: Some(100.0),
        },
    )
    .await
}

/// Creates a branch with only a name.
pub async fn create_test_branch(db: &DatabaseConnection, name: &str) -> Result<entities::branch::Model> {
    organization::create_branch(
        db,
        NewBranch {
            name: name.to_string(),
            address: None,
            city: None,
            state: None,
            zip: None,
        },
    )
    .await
}

/// Creates an employee with no department or branch.
///
/// # Defaults
/// * `start_date`: 2005-01-01
/// * `title`: None
pub async fn create_test_employee(
    db: &DatabaseConnection,
    fname: &str,
    lname: &str,
    superior_emp_id: Option<i32>,
) -> Result<entities::employee::Model> {
    organization::create_employee(
        db,
        NewEmployee {
            fname: fname.to_string(),
            lname: lname.to_string(),
            start_date: date(2005, 1, 1),
            end_date: None,
            superior_emp_id,
            dept_id: None,
            title: None,
            assigned_branch_id: None,
        },
    )
    .await
}

/// Records a transaction on an account.
///
/// # Defaults
/// * `txn_date`: 2021-05-01 12:00:00
/// * `txn_type_cd`: `DBT` (if negative) or `CDT` (otherwise)
/// * no teller or branch
#[allow(clippy::unwrap_used)]
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    account_id: i32,
    amount: f64,
) -> Result<entities::transaction::Model> {
    let txn_type_cd = if amount < 0.0 {
        TransactionType::Dbt
    } else {
        TransactionType::Cdt
    };

    transaction::create_transaction(
        db,
        NewTransaction {
            txn_date: date(2021, 5, 1).and_hms_opt(12, 0, 0).unwrap(),
            account_id,
            txn_type_cd: Some(txn_type_cd),
            amount,
            teller_emp_id: None,
            execution_branch_id: None,
            funds_avail_date: None,
        },
    )
    .await
}

/// Sets up a complete test environment with one individual customer, product `CHK`
/// and an account.
/// Returns (db, account) for common test scenarios.
pub async fn setup_with_account() -> Result<(DatabaseConnection, entities::account::Model)> {
    let db = setup_test_db().await?;
    let owner = create_test_individual(&db, "Jane", "Smith").await?;
    create_test_product(&db, "CHK").await?;
    let account = create_test_account(&db, owner.customer.cust_id, "CHK").await?;
    Ok((db, account))
}
