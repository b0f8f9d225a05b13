/// Accounts, their owners and products
pub mod account;
/// Customers, individual/business extensions and officers
pub mod customer;
/// SQL text rendering for diagnostics
pub mod debug;
/// Whole-database consistency checks
pub mod integrity;
/// In-memory employee superior tree
pub mod org_chart;
/// Branches, departments and employees
pub mod organization;
/// Product types and products
pub mod product;
/// Credits and debits against accounts
pub mod transaction;
