//! Consistency checks over the whole bank database.
//!
//! Foreign keys are enforced by the storage engine on insert, but rows written with
//! enforcement off, customer extension rows and superior loops are not. The check
//! loads every table once and reports what it finds without changing anything.

use crate::{
    core::org_chart::OrgChart,
    entities::{
        Account, Branch, Business, Customer, CustomerType, Department, Employee, Individual,
        Officer, Product, ProductType, Transaction,
    },
    errors::Result,
};
use sea_orm::{ConnectionTrait, EntityTrait};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// A single integrity problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A foreign key column holds a value with no matching parent row
    DanglingForeignKey {
        /// Table holding the reference
        table: &'static str,
        /// Primary key of the referencing row, as `column=value`
        row: String,
        /// Foreign key column
        column: &'static str,
        /// Referenced value with no parent row
        value: String,
    },
    /// The extension row selected by `cust_type_cd` does not exist
    MissingExtension {
        /// Customer without an extension
        cust_id: i32,
        /// The customer's type code
        cust_type: CustomerType,
    },
    /// An extension row of the other kind exists for the customer
    ConflictingExtension {
        /// Customer with the wrong extension
        cust_id: i32,
        /// The customer's type code
        cust_type: CustomerType,
        /// Type of the extension row that was found
        found: CustomerType,
    },
    /// Employees whose superior chain loops back on itself
    SuperiorCycle {
        /// Employees on the loop, starting from the smallest id
        emp_ids: Vec<i32>,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingForeignKey {
                table,
                row,
                column,
                value,
            } => write!(f, "{table}({row}).{column}={value} references a missing row"),
            Self::MissingExtension { cust_id, cust_type } => {
                write!(f, "customer {cust_id} has type {cust_type} but no extension row")
            }
            Self::ConflictingExtension {
                cust_id,
                cust_type,
                found,
            } => write!(
                f,
                "customer {cust_id} has type {cust_type} but an extension row of type {found}"
            ),
            Self::SuperiorCycle { emp_ids } => {
                let ids: Vec<String> = emp_ids.iter().map(ToString::to_string).collect();
                write!(f, "superior cycle: {}", ids.join(" -> "))
            }
        }
    }
}

/// Everything [`check_integrity`] found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Problems in the order they were found
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    /// True when no violations were found
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn check_reference<K>(
        &mut self,
        table: &'static str,
        row: impl fmt::Display,
        column: &'static str,
        value: Option<&K>,
        parents: &BTreeSet<K>,
    ) where
        K: Ord + fmt::Display,
    {
        match value {
            Some(value) if !parents.contains(value) => {
                self.violations.push(Violation::DanglingForeignKey {
                    table,
                    row: row.to_string(),
                    column,
                    value: value.to_string(),
                });
            }
            _ => {}
        }
    }
}

fn keys<M, K: Ord>(rows: &[M], key: impl Fn(&M) -> K) -> BTreeSet<K> {
    rows.iter().map(key).collect()
}

/// Checks every foreign key, every customer extension and the superior tree.
#[instrument(skip(db))]
pub async fn check_integrity<C: ConnectionTrait>(db: &C) -> Result<IntegrityReport> {
    let branches = Branch::find().all(db).await?;
    let departments = Department::find().all(db).await?;
    let employees = Employee::find().all(db).await?;
    let product_types = ProductType::find().all(db).await?;
    let products = Product::find().all(db).await?;
    let customers = Customer::find().all(db).await?;
    let individuals = Individual::find().all(db).await?;
    let businesses = Business::find().all(db).await?;
    let officers = Officer::find().all(db).await?;
    let accounts = Account::find().all(db).await?;
    let transactions = Transaction::find().all(db).await?;
    debug!(
        "Checking {} customers, {} accounts, {} transactions",
        customers.len(),
        accounts.len(),
        transactions.len()
    );

    let branch_ids = keys(&branches, |b| b.branch_id);
    let dept_ids = keys(&departments, |d| d.dept_id);
    let emp_ids = keys(&employees, |e| e.emp_id);
    let product_type_cds = keys(&product_types, |t| t.product_type_cd.clone());
    let product_cds = keys(&products, |p| p.product_cd.clone());
    let cust_ids = keys(&customers, |c| c.cust_id);
    let account_ids = keys(&accounts, |a| a.account_id);

    let mut report = IntegrityReport::default();

    for e in &employees {
        let row = format!("emp_id={}", e.emp_id);
        report.check_reference("employee", &row, "superior_emp_id", e.superior_emp_id.as_ref(), &emp_ids);
        report.check_reference("employee", &row, "dept_id", e.dept_id.as_ref(), &dept_ids);
        report.check_reference("employee", &row, "assigned_branch_id", e.assigned_branch_id.as_ref(), &branch_ids);
    }

    for p in &products {
        let row = format!("product_cd={}", p.product_cd);
        report.check_reference("product", &row, "product_type_cd", Some(&p.product_type_cd), &product_type_cds);
    }

    for i in &individuals {
        report.check_reference("individual", format!("cust_id={}", i.cust_id), "cust_id", Some(&i.cust_id), &cust_ids);
    }
    for b in &businesses {
        report.check_reference("business", format!("cust_id={}", b.cust_id), "cust_id", Some(&b.cust_id), &cust_ids);
    }
    for o in &officers {
        report.check_reference("officer", format!("officer_id={}", o.officer_id), "cust_id", Some(&o.cust_id), &cust_ids);
    }

    for a in &accounts {
        let row = format!("account_id={}", a.account_id);
        report.check_reference("account", &row, "product_cd", Some(&a.product_cd), &product_cds);
        report.check_reference("account", &row, "cust_id", Some(&a.cust_id), &cust_ids);
        report.check_reference("account", &row, "open_emp_id", a.open_emp_id.as_ref(), &emp_ids);
        report.check_reference("account", &row, "open_branch_id", a.open_branch_id.as_ref(), &branch_ids);
    }

    for t in &transactions {
        let row = format!("txn_id={}", t.txn_id);
        report.check_reference("transaction", &row, "account_id", Some(&t.account_id), &account_ids);
        report.check_reference("transaction", &row, "teller_emp_id", t.teller_emp_id.as_ref(), &emp_ids);
        report.check_reference("transaction", &row, "execution_branch_id", t.execution_branch_id.as_ref(), &branch_ids);
    }

    let mut extensions: BTreeMap<i32, Vec<CustomerType>> = BTreeMap::new();
    for i in &individuals {
        extensions.entry(i.cust_id).or_default().push(CustomerType::Individual);
    }
    for b in &businesses {
        extensions.entry(b.cust_id).or_default().push(CustomerType::Business);
    }

    for c in &customers {
        let found = extensions.get(&c.cust_id).map(Vec::as_slice).unwrap_or_default();
        if !found.contains(&c.cust_type_cd) {
            report.violations.push(Violation::MissingExtension {
                cust_id: c.cust_id,
                cust_type: c.cust_type_cd,
            });
        }
        for other in found.iter().filter(|t| **t != c.cust_type_cd) {
            report.violations.push(Violation::ConflictingExtension {
                cust_id: c.cust_id,
                cust_type: c.cust_type_cd,
                found: *other,
            });
        }
    }

    for emp_ids in OrgChart::new(employees).cycles() {
        report.violations.push(Violation::SuperiorCycle { emp_ids });
    }

    if report.is_clean() {
        info!("Integrity check passed");
    } else {
        for violation in &report.violations {
            warn!("Integrity violation: {}", violation);
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{AccountStatus, account, business, customer, employee};
    use crate::test_utils::*;
    use sea_orm::{ActiveModelTrait, Set};

    fn jan_first() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_consistent_database_is_clean() -> Result<()> {
        let (db, account) = setup_with_account().await?;
        create_test_business(&db, "Chilton Engineering").await?;
        let boss = create_test_employee(&db, "Michael", "Smith", None).await?;
        create_test_employee(&db, "Susan", "Barker", Some(boss.emp_id)).await?;
        create_test_transaction(&db, account.account_id, 12.5).await?;

        let report = check_integrity(&db).await?;
        assert!(report.is_clean(), "unexpected violations: {:?}", report.violations);
        Ok(())
    }

    #[tokio::test]
    async fn test_dangling_account_references_reported() -> Result<()> {
        let db = setup_test_db().await?;
        db.execute_unprepared("PRAGMA foreign_keys = OFF").await?;

        account::ActiveModel {
            product_cd: Set("GONE".to_string()),
            cust_id: Set(42),
            open_date: Set(jan_first()),
            status: Set(AccountStatus::Active),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let report = check_integrity(&db).await?;
        assert_eq!(
            report.violations,
            vec![
                Violation::DanglingForeignKey {
                    table: "account",
                    row: "account_id=1".to_string(),
                    column: "product_cd",
                    value: "GONE".to_string(),
                },
                Violation::DanglingForeignKey {
                    table: "account",
                    row: "account_id=1".to_string(),
                    column: "cust_id",
                    value: "42".to_string(),
                },
            ]
        );
        assert_eq!(
            report.violations[1].to_string(),
            "account(account_id=1).cust_id=42 references a missing row"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_extension_mismatches_reported() -> Result<()> {
        let db = setup_test_db().await?;
        let person = create_test_individual(&db, "Jane", "Doe").await?;

        // A business row under an individual customer
        business::ActiveModel {
            cust_id: Set(person.customer.cust_id),
            name: Set("Jane Doe LLC".to_string()),
            state_id: Set("12-345-678".to_string()),
            incorp_date: Set(None),
        }
        .insert(&db)
        .await?;

        // A business customer with no business row
        let bare = customer::ActiveModel {
            fed_id: Set("04-1111111".to_string()),
            cust_type_cd: Set(CustomerType::Business),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let report = check_integrity(&db).await?;
        assert_eq!(
            report.violations,
            vec![
                Violation::ConflictingExtension {
                    cust_id: person.customer.cust_id,
                    cust_type: CustomerType::Individual,
                    found: CustomerType::Business,
                },
                Violation::MissingExtension {
                    cust_id: bare.cust_id,
                    cust_type: CustomerType::Business,
                },
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_self_superior_reported_as_cycle() -> Result<()> {
        let db = setup_test_db().await?;
        let loner = create_test_employee(&db, "Paula", "Roberts", None).await?;

        let mut active: employee::ActiveModel = loner.clone().into();
        active.superior_emp_id = Set(Some(loner.emp_id));
        active.update(&db).await?;

        let report = check_integrity(&db).await?;
        assert_eq!(
            report.violations,
            vec![Violation::SuperiorCycle {
                emp_ids: vec![loner.emp_id]
            }]
        );
        assert!(!report.is_clean());
        assert_eq!(
            report.violations[0].to_string(),
            format!("superior cycle: {}", loner.emp_id)
        );
        Ok(())
    }
}
