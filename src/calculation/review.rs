//! Review transitions for leave applications.
//!
//! Pure state-machine functions taking a Pending application to one of
//! its terminal states. Persistence and locking live in the engine layer;
//! these functions only produce the reviewed application.

use chrono::{DateTime, Duration, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{FineOverride, LeaveApplication, LeaveStatus, ReviewDecision};

fn ensure_reviewable(app: &LeaveApplication, reviewer: &str) -> EngineResult<()> {
    if app.status != LeaveStatus::Pending {
        return Err(EngineError::AlreadyReviewed {
            id: app.id.to_string(),
            status: app.status.to_string(),
        });
    }
    if reviewer == app.employee_id {
        return Err(EngineError::NotPermitted {
            reason: "an employee cannot review their own leave application".to_string(),
        });
    }
    Ok(())
}

/// Accepts a pending application for `approved_days` of its requested
/// range.
///
/// The approved end date lands `approved_days - 1` days after the start;
/// any remainder stays available for reapplication. The apply-time fine
/// assessment stands unless the decision carries an explicit override.
///
/// # Errors
///
/// * `AlreadyReviewed` when the application is not Pending.
/// * `NotPermitted` when the reviewer is the applicant.
/// * `Validation` when `approved_days` is outside `1..=requested_days`.
pub fn accept_application(
    app: &LeaveApplication,
    approved_days: i64,
    hr_message: Option<String>,
    fine: Option<FineOverride>,
    reviewer: &str,
    reviewed_at: DateTime<Utc>,
) -> EngineResult<LeaveApplication> {
    ensure_reviewable(app, reviewer)?;

    if approved_days < 1 || approved_days > app.requested_days {
        return Err(EngineError::Validation {
            field: "approved_days".to_string(),
            message: format!("must be between 1 and {}", app.requested_days),
        });
    }

    let mut reviewed = app.clone();
    reviewed.status = LeaveStatus::Accepted;
    reviewed.approved_days = approved_days;
    reviewed.approved_end_date = Some(app.start_date + Duration::days(approved_days - 1));
    reviewed.hr_message = hr_message;
    reviewed.reviewed_by = Some(reviewer.to_string());
    reviewed.reviewed_at = Some(reviewed_at);
    if let Some(fine) = fine {
        reviewed.is_fine_applicable = fine.applicable;
        reviewed.fine_amount = fine.amount;
    }
    Ok(reviewed)
}

/// Denies a pending application in full.
///
/// # Errors
///
/// * `AlreadyReviewed` when the application is not Pending.
/// * `NotPermitted` when the reviewer is the applicant.
pub fn deny_application(
    app: &LeaveApplication,
    hr_message: Option<String>,
    reviewer: &str,
    reviewed_at: DateTime<Utc>,
) -> EngineResult<LeaveApplication> {
    ensure_reviewable(app, reviewer)?;

    let mut reviewed = app.clone();
    reviewed.status = LeaveStatus::Denied;
    reviewed.approved_days = 0;
    reviewed.approved_end_date = None;
    reviewed.hr_message = hr_message;
    reviewed.reviewed_by = Some(reviewer.to_string());
    reviewed.reviewed_at = Some(reviewed_at);
    Ok(reviewed)
}

/// Applies a [`ReviewDecision`] to a pending application.
pub fn apply_decision(
    app: &LeaveApplication,
    decision: ReviewDecision,
    reviewer: &str,
    reviewed_at: DateTime<Utc>,
) -> EngineResult<LeaveApplication> {
    match decision {
        ReviewDecision::Accept {
            approved_days,
            hr_message,
            fine,
        } => accept_application(app, approved_days, hr_message, fine, reviewer, reviewed_at),
        ReviewDecision::Deny { hr_message } => {
            deny_application(app, hr_message, reviewer, reviewed_at)
        }
    }
}
