//! Account data access - opening accounts and navigating to their owner and product.
//!
//! Account rows hold the foreign keys; the customer side of the relationship is read
//! through the indexed `cust_id` column. Balance columns are written as given and
//! are never recomputed from transactions here.

use crate::{
    core::customer::{CustomerProfile, load_customer_profile},
    entities::{Account, AccountStatus, Product, account, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Columns for a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Product code
    pub product_cd: String,
    /// Owning customer
    pub cust_id: i32,
    /// Date the account was opened
    pub open_date: Date,
    /// Employee who opened the account, nullable
    pub open_emp_id: Option<i32>,
    /// Branch where the account was opened, nullable
    pub open_branch_id: Option<i32>,
    /// Available balance, nullable
    pub avail_balance: Option<f64>,
    /// Pending balance, nullable
    pub pending_balance: Option<f64>,
}

/// An account with its owning customer and product resolved
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDetails {
    /// The account row
    pub account: account::Model,
    /// Owning customer with its extension
    pub customer: CustomerProfile,
    /// Product the account is an instance of
    pub product: product::Model,
}

/// Opens a new account with status `ACTIVE`.
///
/// The customer, product, employee and branch must exist; the database rejects
/// the insert otherwise.
#[instrument(skip(db, new_account), fields(cust_id = new_account.cust_id, product_cd = %new_account.product_cd))]
pub async fn create_account(db: &DatabaseConnection, new_account: NewAccount) -> Result<account::Model> {
    let account = account::ActiveModel {
        product_cd: Set(new_account.product_cd),
        cust_id: Set(new_account.cust_id),
        open_date: Set(new_account.open_date),
        close_date: Set(None),
        last_activity_date: Set(None),
        status: Set(AccountStatus::Active),
        open_emp_id: Set(new_account.open_emp_id),
        open_branch_id: Set(new_account.open_branch_id),
        avail_balance: Set(new_account.avail_balance),
        pending_balance: Set(new_account.pending_balance),
        ..Default::default()
    };

    let result = account.insert(db).await?;
    info!("Opened account {}", result.account_id);
    Ok(result)
}

/// Finds an account by its primary key.
pub async fn get_account_by_id(
    db: &DatabaseConnection,
    account_id: i32,
) -> Result<Option<account::Model>> {
    Account::find_by_id(account_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every account owned by a customer, ordered by account id.
pub async fn get_accounts_for_customer(
    db: &DatabaseConnection,
    cust_id: i32,
) -> Result<Vec<account::Model>> {
    Account::find()
        .filter(account::Column::CustId.eq(cust_id))
        .order_by_asc(account::Column::AccountId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads an account and resolves its customer (with extension) and product.
///
/// # Errors
/// Returns `Error::NotFound` if the account, or a row it references, is missing.
#[instrument(skip(db))]
pub async fn load_account_details(db: &DatabaseConnection, account_id: i32) -> Result<AccountDetails> {
    let (account, product) = Account::find_by_id(account_id)
        .find_also_related(Product)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("account", account_id))?;

    let product = product.ok_or_else(|| Error::not_found("product", &account.product_cd))?;
    let customer = load_customer_profile(db, account.cust_id).await?;

    debug!("Resolved account {} -> customer {}, product {}", account_id, customer.customer.cust_id, product.product_cd);
    Ok(AccountDetails {
        account,
        customer,
        product,
    })
}

/// Sets an account's status and close date.
///
/// # Errors
/// Returns `Error::NotFound` if the account does not exist.
#[instrument(skip(db))]
pub async fn update_account_status(
    db: &DatabaseConnection,
    account_id: i32,
    status: AccountStatus,
    close_date: Option<Date>,
) -> Result<account::Model> {
    let mut account: account::ActiveModel = Account::find_by_id(account_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("account", account_id))?
        .into();

    account.status = Set(status);
    account.close_date = Set(close_date);

    let result = account.update(db).await?;
    info!("Account {} is now {}", account_id, result.status);
    Ok(result)
}
