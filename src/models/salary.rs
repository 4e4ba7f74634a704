//! Salary component and payslip models.
//!
//! This module defines the component catalogue entries, the per-month
//! working set of component lines, the persisted [`SalaryRecord`], and the
//! displayable [`SalarySlip`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a salary component adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Adds to pay; resolved amounts are always >= 0.
    Earning,
    /// Subtracts from pay; resolved amounts are always <= 0.
    Deduction,
}

/// How a component line's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// The value is a literal monthly amount.
    Flat,
    /// The value is a percentage of the BASIC component's final amount.
    Percentage,
}

/// An entry in the global salary component catalogue.
///
/// The catalogue defines which components exist and how they behave;
/// per-employee values live on [`SalaryComponentLine`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponentDefinition {
    /// The component name (e.g., "BASIC", "HRA", "PF").
    pub name: String,
    /// Whether the component is an earning or a deduction.
    pub kind: ComponentKind,
    /// Whether the amount is prorated by payable days.
    pub calculate_days: bool,
}

/// One component line in an employee's monthly working set.
///
/// # Example
///
/// ```
/// use hr_engine::models::{SalaryComponentLine, ValueKind};
/// use rust_decimal::Decimal;
///
/// let basic = SalaryComponentLine::flat("BASIC", Decimal::new(10000, 0), false);
/// assert_eq!(basic.value_kind, ValueKind::Flat);
/// assert!(basic.allowed);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryComponentLine {
    /// The component name, matching a catalogue entry.
    pub name: String,
    /// How `value` is interpreted.
    pub value_kind: ValueKind,
    /// The flat amount or the percentage, per `value_kind`.
    pub value: Decimal,
    /// The resolved amount; negative for deductions.
    pub amount: Decimal,
    /// Whether this line subtracts from pay.
    pub is_deduction: bool,
    /// Whether this line participates in totals. A disabled line keeps
    /// its row with amount and value zeroed.
    pub allowed: bool,
}

impl SalaryComponentLine {
    /// Creates an enabled flat-valued line with an unresolved amount.
    pub fn flat(name: impl Into<String>, value: Decimal, is_deduction: bool) -> Self {
        Self {
            name: name.into(),
            value_kind: ValueKind::Flat,
            value,
            amount: Decimal::ZERO,
            is_deduction,
            allowed: true,
        }
    }

    /// Creates an enabled percentage-valued line with an unresolved amount.
    pub fn percentage(name: impl Into<String>, percent: Decimal, is_deduction: bool) -> Self {
        Self {
            name: name.into(),
            value_kind: ValueKind::Percentage,
            value: percent,
            amount: Decimal::ZERO,
            is_deduction,
            allowed: true,
        }
    }
}

/// The persistence state of a salary record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Computed but not yet saved.
    Draft,
    /// Persisted for the month.
    Saved,
}

/// The saved salary computation for one employee and month.
///
/// Exactly one record exists per (employee, month, year); saving again
/// replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar month, 1-12.
    pub month: u32,
    /// The calendar year.
    pub year: i32,
    /// The resolved component lines.
    pub components: Vec<SalaryComponentLine>,
    /// The BASIC component's final amount.
    pub basic_salary: Decimal,
    /// Sum of allowed non-deduction amounts.
    pub gross_salary: Decimal,
    /// Sum of all allowed amounts (deductions already negative).
    pub net_salary: Decimal,
    /// The persistence state.
    pub status: RecordStatus,
}

/// Whether a payslip came from a saved record or a fallback estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlipStatus {
    /// Built from a saved salary record.
    Generated,
    /// No record exists; built from base salary and unpaid-leave days.
    NotGenerated,
}

/// Leave days within one calendar month, bucketed by pay mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLeaveDays {
    /// Days of accepted leave under paid-mode types.
    pub paid_days: i64,
    /// Days of accepted leave under free-mode (unpaid) types.
    pub unpaid_days: i64,
}

/// A displayable payslip for one employee and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySlip {
    /// The employee the slip belongs to.
    pub employee_id: String,
    /// The calendar month, 1-12.
    pub month: u32,
    /// The calendar year.
    pub year: i32,
    /// Whether the slip came from a saved record.
    pub status: SlipStatus,
    /// The component lines; empty for a fallback slip.
    pub components: Vec<SalaryComponentLine>,
    /// The employee's monthly base salary.
    pub basic_salary: Decimal,
    /// The gross pay for the month.
    pub gross_salary: Decimal,
    /// The net pay for the month.
    pub net_salary: Decimal,
    /// Accepted-leave days falling in the month.
    pub leave_days: MonthlyLeaveDays,
}

/// Attendance aggregation inputs for one employee and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Working days in the month.
    pub total_working_days: u32,
    /// Days the employee was present.
    pub present_days: u32,
    /// Approved paid-leave days in the month.
    pub paid_leave_days: u32,
    /// Unpaid-leave days in the month.
    pub unpaid_leave_days: u32,
}

impl AttendanceSummary {
    /// Returns the days the employee is paid for: total working days
    /// minus unpaid-leave days, floored at zero.
    pub fn payable_days(&self) -> u32 {
        self.total_working_days
            .saturating_sub(self.unpaid_leave_days)
    }
}
