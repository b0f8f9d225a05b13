//! Organization data access - branches, departments and employees.
//!
//! The superior relationship is a self reference on `employee`. Superiors are
//! followed through `employee::SuperiorLink`; subordinates are a filter on the
//! indexed `superior_emp_id` column.

use crate::{
    entities::{
        Branch, Department, Employee, branch, department,
        employee::{self, SuperiorLink},
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Columns for a new branch
#[derive(Debug, Clone)]
pub struct NewBranch {
    /// Name
    pub name: String,
    /// Street address, nullable
    pub address: Option<String>,
    /// City, nullable
    pub city: Option<String>,
    /// State, nullable
    pub state: Option<String>,
    /// Zip code, nullable
    pub zip: Option<String>,
}

/// Columns for a new employee
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// First name
    pub fname: String,
    /// Last name
    pub lname: String,
    /// First day of employment
    pub start_date: Date,
    /// Last day of employment, nullable
    pub end_date: Option<Date>,
    /// Superior employee, nullable
    pub superior_emp_id: Option<i32>,
    /// Department, nullable
    pub dept_id: Option<i32>,
    /// Job title, nullable
    pub title: Option<String>,
    /// Assigned branch, nullable
    pub assigned_branch_id: Option<i32>,
}

/// Creates a branch.
#[instrument(skip(db, new_branch), fields(name = %new_branch.name))]
pub async fn create_branch(db: &DatabaseConnection, new_branch: NewBranch) -> Result<branch::Model> {
    let branch = branch::ActiveModel {
        name: Set(new_branch.name),
        address: Set(new_branch.address),
        city: Set(new_branch.city),
        state: Set(new_branch.state),
        zip: Set(new_branch.zip),
        ..Default::default()
    };
    let result = branch.insert(db).await?;
    info!("Created branch {} ({})", result.branch_id, result.name);
    Ok(result)
}

/// Creates a department.
#[instrument(skip(db))]
pub async fn create_department(db: &DatabaseConnection, name: String) -> Result<department::Model> {
    let department = department::ActiveModel {
        name: Set(name),
        ..Default::default()
    };
    let result = department.insert(db).await?;
    info!("Created department {} ({})", result.dept_id, result.name);
    Ok(result)
}

/// Creates an employee. The superior, department and branch must already exist.
#[instrument(skip(db, new_employee), fields(superior = ?new_employee.superior_emp_id))]
pub async fn create_employee(db: &DatabaseConnection, new_employee: NewEmployee) -> Result<employee::Model> {
    let employee = employee::ActiveModel {
        fname: Set(new_employee.fname),
        lname: Set(new_employee.lname),
        start_date: Set(new_employee.start_date),
        end_date: Set(new_employee.end_date),
        superior_emp_id: Set(new_employee.superior_emp_id),
        dept_id: Set(new_employee.dept_id),
        title: Set(new_employee.title),
        assigned_branch_id: Set(new_employee.assigned_branch_id),
        ..Default::default()
    };
    let result = employee.insert(db).await?;
    info!("Created employee {}", result.emp_id);
    Ok(result)
}

/// Finds a branch by its primary key.
pub async fn get_branch_by_id(db: &DatabaseConnection, branch_id: i32) -> Result<Option<branch::Model>> {
    Branch::find_by_id(branch_id).one(db).await.map_err(Into::into)
}

/// Finds a department by its primary key.
pub async fn get_department_by_id(
    db: &DatabaseConnection,
    dept_id: i32,
) -> Result<Option<department::Model>> {
    Department::find_by_id(dept_id).one(db).await.map_err(Into::into)
}

/// Finds an employee by its primary key.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    emp_id: i32,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(emp_id).one(db).await.map_err(Into::into)
}

/// Returns the superior of an employee, or None at the top of the tree.
///
/// # Errors
/// Returns `Error::NotFound` if the employee does not exist.
pub async fn get_superior(db: &DatabaseConnection, emp_id: i32) -> Result<Option<employee::Model>> {
    let employee = Employee::find_by_id(emp_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("employee", emp_id))?;

    employee
        .find_linked(SuperiorLink)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the direct subordinates of an employee, ordered by id.
pub async fn get_subordinates(db: &DatabaseConnection, emp_id: i32) -> Result<Vec<employee::Model>> {
    Employee::find()
        .filter(employee::Column::SuperiorEmpId.eq(emp_id))
        .order_by_asc(employee::Column::EmpId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the employees assigned to a branch, ordered by id.
pub async fn get_employees_for_branch(
    db: &DatabaseConnection,
    branch_id: i32,
) -> Result<Vec<employee::Model>> {
    Employee::find()
        .filter(employee::Column::AssignedBranchId.eq(branch_id))
        .order_by_asc(employee::Column::EmpId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the employees of a department, ordered by id.
pub async fn get_employees_for_department(
    db: &DatabaseConnection,
    dept_id: i32,
) -> Result<Vec<employee::Model>> {
    Employee::find()
        .filter(employee::Column::DeptId.eq(dept_id))
        .order_by_asc(employee::Column::EmpId)
        .all(db)
        .await
        .map_err(Into::into)
}
