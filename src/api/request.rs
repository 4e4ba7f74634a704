//! Request types for the leave and payroll API.
//!
//! This module defines the JSON request structures for the leave and
//! payroll endpoints and their conversions into domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    AttendanceSummary, LeaveRequest, ReviewDecision, SalaryComponentLine, ValueKind,
};

/// Request body for `POST /leaves` and `POST /leaves/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveApplyRequest {
    /// The employee requesting leave.
    pub employee_id: String,
    /// The leave type code.
    pub leave_type: String,
    /// The first day of leave (inclusive).
    pub start_date: NaiveDate,
    /// The last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The stated reason for the leave.
    pub reason: String,
    /// The original application id when reapplying for an unapproved
    /// remainder.
    #[serde(default)]
    pub reapplied_from: Option<Uuid>,
}

impl From<LeaveApplyRequest> for LeaveRequest {
    fn from(req: LeaveApplyRequest) -> Self {
        LeaveRequest {
            employee_id: req.employee_id,
            leave_type: req.leave_type,
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason,
            reapplied_from: req.reapplied_from,
        }
    }
}

/// Request body for `POST /leaves/{id}/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// The reviewer's identifier.
    pub reviewer: String,
    /// The decision: accept with a day count, or deny.
    #[serde(flatten)]
    pub decision: ReviewDecision,
}

/// Attendance aggregation inputs in a payroll request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Working days in the month.
    pub total_working_days: u32,
    /// Days the employee was present.
    #[serde(default)]
    pub present_days: u32,
    /// Approved paid-leave days in the month.
    #[serde(default)]
    pub paid_leave_days: u32,
    /// Unpaid-leave days in the month.
    #[serde(default)]
    pub unpaid_leave_days: u32,
}

impl From<AttendanceRequest> for AttendanceSummary {
    fn from(req: AttendanceRequest) -> Self {
        AttendanceSummary {
            total_working_days: req.total_working_days,
            present_days: req.present_days,
            paid_leave_days: req.paid_leave_days,
            unpaid_leave_days: req.unpaid_leave_days,
        }
    }
}

/// One edited component line in a payroll request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentLineRequest {
    /// The component name, matching a catalogue entry.
    pub name: String,
    /// How `value` is interpreted.
    pub value_kind: ValueKind,
    /// The flat amount or the percentage, per `value_kind`.
    pub value: Decimal,
    /// Whether this line subtracts from pay.
    #[serde(default)]
    pub is_deduction: bool,
    /// Whether this line participates in totals.
    #[serde(default = "default_allowed")]
    pub allowed: bool,
}

fn default_allowed() -> bool {
    true
}

impl From<ComponentLineRequest> for SalaryComponentLine {
    fn from(req: ComponentLineRequest) -> Self {
        SalaryComponentLine {
            name: req.name,
            value_kind: req.value_kind,
            value: req.value,
            amount: Decimal::ZERO,
            is_deduction: req.is_deduction,
            allowed: req.allowed,
        }
    }
}

/// Request body for `POST /payroll/components`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeComponentsRequest {
    /// The employee to resolve components for.
    pub employee_id: String,
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1-12.
    pub month: u32,
    /// The month's attendance aggregation.
    pub attendance: AttendanceRequest,
    /// Edited lines to resolve instead of the persisted or default set.
    #[serde(default)]
    pub overrides: Option<Vec<ComponentLineRequest>>,
}

/// Request body for `PUT /payroll/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRecordRequest {
    /// The employee to save the record for.
    pub employee_id: String,
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1-12.
    pub month: u32,
    /// The month's attendance aggregation.
    pub attendance: AttendanceRequest,
    /// The working set to resolve and persist.
    pub components: Vec<ComponentLineRequest>,
}
