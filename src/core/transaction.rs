//! Transaction data access - recording credits and debits and listing them.
//!
//! Recording a transaction only inserts the row. Account balances are owned by
//! whoever posts transactions and are not adjusted here.

use crate::{
    entities::{TransactionType, transaction},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Columns for a new transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// When the transaction happened
    pub txn_date: DateTime,
    /// Account the transaction is posted against
    pub account_id: i32,
    /// Credit or debit, nullable
    pub txn_type_cd: Option<TransactionType>,
    /// Transaction amount
    pub amount: f64,
    /// Teller, nullable
    pub teller_emp_id: Option<i32>,
    /// Executing branch, nullable
    pub execution_branch_id: Option<i32>,
    /// When the funds become available, nullable
    pub funds_avail_date: Option<DateTime>,
}

/// Records a transaction against an existing account.
#[instrument(skip(db, new_transaction), fields(account_id = new_transaction.account_id))]
pub async fn create_transaction(
    db: &DatabaseConnection,
    new_transaction: NewTransaction,
) -> Result<transaction::Model> {
    let transaction_model = transaction::ActiveModel {
        txn_date: Set(new_transaction.txn_date),
        account_id: Set(new_transaction.account_id),
        txn_type_cd: Set(new_transaction.txn_type_cd),
        amount: Set(new_transaction.amount),
        teller_emp_id: Set(new_transaction.teller_emp_id),
        execution_branch_id: Set(new_transaction.execution_branch_id),
        funds_avail_date: Set(new_transaction.funds_avail_date),
        ..Default::default()
    };

    let result = transaction_model.insert(db).await?;
    info!(
        "Recorded transaction {} on account {}",
        result.txn_id, result.account_id
    );
    Ok(result)
}

/// Retrieves a specific transaction by its unique ID.
pub async fn get_transaction_by_id(
    db: &DatabaseConnection,
    txn_id: i32,
) -> Result<Option<transaction::Model>> {
    crate::entities::Transaction::find_by_id(txn_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all transactions for an account, ordered by date (newest first).
pub async fn get_transactions_for_account(
    db: &DatabaseConnection,
    account_id: i32,
) -> Result<Vec<transaction::Model>> {
    crate::entities::Transaction::find()
        .filter(transaction::Column::AccountId.eq(account_id))
        .order_by_desc(transaction::Column::TxnDate)
        .order_by_desc(transaction::Column::TxnId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all transactions executed at a branch, ordered by date (newest first).
pub async fn get_transactions_for_branch(
    db: &DatabaseConnection,
    branch_id: i32,
) -> Result<Vec<transaction::Model>> {
    crate::entities::Transaction::find()
        .filter(transaction::Column::ExecutionBranchId.eq(branch_id))
        .order_by_desc(transaction::Column::TxnDate)
        .order_by_desc(transaction::Column::TxnId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all transactions handled by a teller, ordered by date (newest first).
pub async fn get_transactions_for_teller(
    db: &DatabaseConnection,
    teller_emp_id: i32,
) -> Result<Vec<transaction::Model>> {
    crate::entities::Transaction::find()
        .filter(transaction::Column::TellerEmpId.eq(teller_emp_id))
        .order_by_desc(transaction::Column::TxnDate)
        .order_by_desc(transaction::Column::TxnId)
        .all(db)
        .await
        .map_err(Into::into)
}
