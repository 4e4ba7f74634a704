//! Domain models for the leave and payroll engine.
//!
//! This module contains the core data structures: employee profiles,
//! leave applications and balances, and salary components and records.

mod employee;
mod leave;
mod salary;

pub use employee::EmployeeProfile;
pub use leave::{
    FineOverride, LeaveApplication, LeaveRequest, LeaveSplit, LeaveStatus, LeaveTypeBalance,
    ReviewDecision,
};
pub use salary::{
    AttendanceSummary, ComponentKind, MonthlyLeaveDays, RecordStatus, SalaryComponentDefinition,
    SalaryComponentLine, SalaryRecord, SalarySlip, SlipStatus, ValueKind,
};
