//! In-memory view of the employee superior tree.
//!
//! Employees are stored in an arena keyed by `emp_id`; every edge is an id, never a
//! reference into another record. The data in the table is not guaranteed to be a
//! tree, so traversals stop before revisiting an employee and [`OrgChart::cycles`]
//! reports any loops.

use crate::{
    entities::{Employee, employee},
    errors::Result,
};
use sea_orm::{ConnectionTrait, EntityTrait};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// Employees keyed by id, plus a superior to subordinates index
#[derive(Debug, Clone, Default)]
pub struct OrgChart {
    employees: BTreeMap<i32, employee::Model>,
    subordinates: BTreeMap<i32, Vec<i32>>,
}

impl OrgChart {
    /// Builds the chart from a set of employee rows.
    #[must_use]
    pub fn new(employees: impl IntoIterator<Item = employee::Model>) -> Self {
        let employees: BTreeMap<i32, employee::Model> =
            employees.into_iter().map(|e| (e.emp_id, e)).collect();

        let mut subordinates: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for employee in employees.values() {
            if let Some(superior) = employee.superior_emp_id {
                subordinates.entry(superior).or_default().push(employee.emp_id);
            }
        }

        Self {
            employees,
            subordinates,
        }
    }

    /// Loads every employee from the database.
    #[instrument(skip(db))]
    pub async fn load<C: ConnectionTrait>(db: &C) -> Result<Self> {
        let employees = Employee::find().all(db).await?;
        debug!("Loaded {} employees into org chart", employees.len());
        Ok(Self::new(employees))
    }

    /// The employee with `emp_id`, if present
    #[must_use]
    pub fn get(&self, emp_id: i32) -> Option<&employee::Model> {
        self.employees.get(&emp_id)
    }

    /// The superior of `emp_id`, if both the employee and the superior are present.
    #[must_use]
    pub fn superior(&self, emp_id: i32) -> Option<&employee::Model> {
        self.get(emp_id)?
            .superior_emp_id
            .and_then(|superior| self.get(superior))
    }

    /// Direct subordinates of `emp_id`, in id order.
    #[must_use]
    pub fn subordinates(&self, emp_id: i32) -> Vec<&employee::Model> {
        self.subordinates
            .get(&emp_id)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    /// Walks upward from `emp_id`, starting with its immediate superior.
    ///
    /// The walk ends at an employee without a superior, at a superior id that is not
    /// in the chart, or just before an employee would be visited a second time.
    #[must_use]
    pub fn chain_of_command(&self, emp_id: i32) -> Vec<&employee::Model> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::from([emp_id]);
        let mut current = emp_id;

        while let Some(superior) = self.superior(current) {
            if !seen.insert(superior.emp_id) {
                break;
            }
            chain.push(superior);
            current = superior.emp_id;
        }
        chain
    }

    /// Employees with no superior, in id order.
    #[must_use]
    pub fn roots(&self) -> Vec<&employee::Model> {
        self.employees
            .values()
            .filter(|e| e.superior_emp_id.is_none())
            .collect()
    }

    /// Every loop in the superior relation, each listed once.
    ///
    /// A loop is reported starting from its smallest id and following superior
    /// edges, so an employee who is their own superior yields `[emp_id]`.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<i32>> {
        // Each employee has at most one superior, so every walk either ends or
        // falls into exactly one loop.
        let mut finished: BTreeSet<i32> = BTreeSet::new();
        let mut cycles = Vec::new();

        for &start in self.employees.keys() {
            if finished.contains(&start) {
                continue;
            }

            let mut path: Vec<i32> = Vec::new();
            let mut position: BTreeMap<i32, usize> = BTreeMap::new();
            let mut current = Some(start);

            while let Some(id) = current {
                if finished.contains(&id) {
                    break;
                }
                if let Some(&index) = position.get(&id) {
                    let mut cycle = path[index..].to_vec();
                    if let Some(min_index) = cycle
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, id)| **id)
                        .map(|(i, _)| i)
                    {
                        cycle.rotate_left(min_index);
                    }
                    cycles.push(cycle);
                    break;
                }
                position.insert(id, path.len());
                path.push(id);
                current = self
                    .get(id)
                    .and_then(|e| e.superior_emp_id)
                    .filter(|superior| self.employees.contains_key(superior));
            }

            finished.extend(path);
        }

        cycles.sort();
        cycles
    }

    /// Number of employees in the chart
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// True when the chart holds no employees
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_employee, setup_test_db};
    use chrono::NaiveDate;

    fn staff(emp_id: i32, superior_emp_id: Option<i32>) -> employee::Model {
        employee::Model {
            emp_id,
            fname: format!("First{emp_id}"),
            lname: format!("Last{emp_id}"),
            start_date: NaiveDate::default(),
            end_date: None,
            superior_emp_id,
            dept_id: None,
            title: None,
            assigned_branch_id: None,
        }
    }

    fn ids(employees: &[&employee::Model]) -> Vec<i32> {
        employees.iter().map(|e| e.emp_id).collect()
    }

    #[test]
    fn test_tree_navigation() {
        let chart = OrgChart::new([
            staff(1, None),
            staff(2, Some(1)),
            staff(3, Some(1)),
            staff(4, Some(2)),
            staff(5, Some(4)),
        ]);

        assert_eq!(chart.len(), 5);
        assert_eq!(chart.superior(5).map(|e| e.emp_id), Some(4));
        assert!(chart.superior(1).is_none());
        assert_eq!(ids(&chart.subordinates(1)), vec![2, 3]);
        assert!(chart.subordinates(5).is_empty());
        assert_eq!(ids(&chart.chain_of_command(5)), vec![4, 2, 1]);
        assert_eq!(ids(&chart.roots()), vec![1]);
        assert!(chart.cycles().is_empty());
    }

    #[test]
    fn test_self_superior_is_a_cycle() {
        let chart = OrgChart::new([staff(1, None), staff(7, Some(7))]);

        assert_eq!(chart.cycles(), vec![vec![7]]);
        assert!(chart.chain_of_command(7).is_empty());
        assert_eq!(ids(&chart.subordinates(7)), vec![7]);
    }

    #[test]
    fn test_longer_cycle_reported_once() {
        let chart = OrgChart::new([
            staff(3, Some(1)),
            staff(1, Some(2)),
            staff(2, Some(3)),
            staff(4, Some(3)),
            staff(5, None),
        ]);

        assert_eq!(chart.cycles(), vec![vec![1, 2, 3]]);
        assert_eq!(ids(&chart.chain_of_command(4)), vec![3, 1, 2]);
        assert_eq!(ids(&chart.roots()), vec![5]);
    }

    #[test]
    fn test_missing_superior_ends_the_chain() {
        let chart = OrgChart::new([staff(2, Some(99))]);

        assert!(chart.superior(2).is_none());
        assert!(chart.chain_of_command(2).is_empty());
        assert!(chart.cycles().is_empty());
        assert!(chart.get(99).is_none());
    }

    #[test]
    fn test_empty_chart() {
        let chart = OrgChart::default();
        assert!(chart.is_empty());
        assert!(chart.roots().is_empty());
        assert!(chart.cycles().is_empty());
    }

    #[tokio::test]
    async fn test_load_from_database() -> Result<()> {
        let db = setup_test_db().await?;
        let boss = create_test_employee(&db, "Michael", "Smith", None).await?;
        let clerk = create_test_employee(&db, "Chris", "Tucker", Some(boss.emp_id)).await?;

        let chart = OrgChart::load(&db).await?;
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.get(clerk.emp_id), Some(&clerk));
        assert_eq!(chart.superior(clerk.emp_id), Some(&boss));
        assert_eq!(ids(&chart.roots()), vec![boss.emp_id]);

        Ok(())
    }
}
