//! Employee model.
//!
//! This module defines the read-only slice of employee base data the
//! engine consumes. Full employee CRUD lives outside this core.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The employee base data consumed by leave and payroll operations.
///
/// # Example
///
/// ```
/// use hr_engine::models::EmployeeProfile;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeProfile {
///     id: "emp_001".to_string(),
///     name: "Asha Verma".to_string(),
///     base_salary: Decimal::new(30000, 0),
///     joined_on: NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
/// };
/// assert_eq!(employee.id, "emp_001");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The monthly base salary, seeding the BASIC component.
    pub base_salary: Decimal,
    /// The date the employee joined.
    pub joined_on: NaiveDate,
}
