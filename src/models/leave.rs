//! Leave application models and related types.
//!
//! This module defines the [`LeaveApplication`] audit record, the input
//! and decision types that create and mutate it, and the per-type balance
//! view produced by the balance calculator.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The review state of a leave application.
///
/// Applications start `Pending` and move to exactly one of the terminal
/// states `Accepted` or `Denied`; no further transition is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting review.
    Pending,
    /// Granted, possibly for fewer days than requested.
    Accepted,
    /// Refused in full.
    Denied,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "Pending"),
            LeaveStatus::Accepted => write!(f, "Accepted"),
            LeaveStatus::Denied => write!(f, "Denied"),
        }
    }
}

/// A proposed leave request, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The employee requesting leave.
    pub employee_id: String,
    /// The leave type code (e.g., "casual", "sick", "lwp").
    pub leave_type: String,
    /// The first day of leave (inclusive).
    pub start_date: NaiveDate,
    /// The last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The stated reason for the leave.
    pub reason: String,
    /// When reapplying for the unapproved remainder of a partially
    /// approved leave, the id of that original application.
    #[serde(default)]
    pub reapplied_from: Option<Uuid>,
}

impl LeaveRequest {
    /// Returns the inclusive day count of the requested range.
    ///
    /// Negative when `end_date` precedes `start_date`; validation rejects
    /// that case.
    pub fn requested_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// The paid/unpaid split of a validated leave request.
///
/// `paid_days + lwp_days` always equals the requested day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSplit {
    /// Days covered by the remaining paid balance.
    pub paid_days: i64,
    /// Days falling to leave-without-pay.
    pub lwp_days: i64,
}

/// A leave application, from submission through review.
///
/// Applications form an append-only audit trail: they are created on
/// apply, mutated only by review, and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Unique identifier for the application.
    pub id: Uuid,
    /// The employee the application belongs to.
    pub employee_id: String,
    /// The leave type code.
    pub leave_type: String,
    /// The first day of leave (inclusive).
    pub start_date: NaiveDate,
    /// The last requested day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The stated reason for the leave.
    pub reason: String,
    /// The inclusive day count of `[start_date, end_date]`.
    pub requested_days: i64,
    /// Days actually granted; zero until accepted.
    pub approved_days: i64,
    /// The last day actually granted, when approval was partial or full.
    pub approved_end_date: Option<NaiveDate>,
    /// Days covered by paid balance at validation time.
    pub paid_days: i64,
    /// Days falling to leave-without-pay at validation time.
    pub lwp_days: i64,
    /// The review state.
    pub status: LeaveStatus,
    /// Whether the monthly-frequency fine applies to this application.
    pub is_fine_applicable: bool,
    /// The fine amount, zero when no fine applies.
    pub fine_amount: Decimal,
    /// Reviewer's message to the employee.
    pub hr_message: Option<String>,
    /// When the application was submitted.
    pub applied_at: DateTime<Utc>,
    /// Who reviewed the application.
    pub reviewed_by: Option<String>,
    /// When the application was reviewed.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Whether this application reapplies for an unapproved remainder.
    pub is_reapplication: bool,
    /// The application this one reapplies against, if any.
    pub reapplied_from: Option<Uuid>,
}

impl LeaveApplication {
    /// Returns the effective last day of this leave.
    ///
    /// For accepted leaves this is the approved end date (which partial
    /// approval may pull earlier than the requested end); otherwise the
    /// requested end date.
    pub fn effective_end(&self) -> NaiveDate {
        self.approved_end_date.unwrap_or(self.end_date)
    }

    /// Returns the effective `[start, end]` range occupied by this leave.
    pub fn effective_range(&self) -> (NaiveDate, NaiveDate) {
        (self.start_date, self.effective_end())
    }

    /// Returns the number of requested days the review did not grant.
    pub fn unapproved_days(&self) -> i64 {
        self.requested_days - self.approved_days
    }

    /// Returns the date window an employee may reapply for.
    ///
    /// Only an accepted application with an unapproved remainder has a
    /// reapplication window: `[approved_end_date + 1 day, end_date]`.
    pub fn reapplication_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        if self.status != LeaveStatus::Accepted || self.unapproved_days() <= 0 {
            return None;
        }
        let approved_end = self.approved_end_date?;
        Some((approved_end + Duration::days(1), self.end_date))
    }
}

/// The remaining balance for one leave type in the current year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeBalance {
    /// The leave type code.
    pub leave_type: String,
    /// The yearly entitlement from the policy.
    pub total_days: i64,
    /// Approved days already taken this calendar year.
    pub days_taken: i64,
    /// Entitlement minus taken days. Not clamped at zero: a negative
    /// value reports an over-allocation as-is.
    pub days_remaining: i64,
}

/// A fine override supplied by a reviewer, replacing the apply-time
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FineOverride {
    /// Whether the fine applies.
    pub applicable: bool,
    /// The fine amount to record.
    pub amount: Decimal,
}

/// A reviewer's decision on a pending leave application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Grant the application, possibly for fewer days than requested.
    Accept {
        /// Days to grant; must be between 1 and the requested count.
        approved_days: i64,
        /// Message to the employee.
        #[serde(default)]
        hr_message: Option<String>,
        /// Explicit fine override; apply-time values stand when absent.
        #[serde(default)]
        fine: Option<FineOverride>,
    },
    /// Refuse the application in full.
    Deny {
        /// Message to the employee.
        #[serde(default)]
        hr_message: Option<String>,
    },
}
