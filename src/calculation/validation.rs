//! Leave request validation and paid/unpaid splitting.
//!
//! Validates a proposed leave request against the policy, the employee's
//! remaining balances, and their existing accepted leaves, then splits the
//! requested days into paid and leave-without-pay buckets.

use crate::config::{LeaveMode, LeavePolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveApplication, LeaveRequest, LeaveSplit, LeaveTypeBalance};

use super::day_math::ranges_overlap;

/// Validates a leave request and splits it into paid and unpaid days.
///
/// The checks run in order:
///
/// 1. Field validation: non-empty reason, a known active leave type, and
///    a start date on or before the end date.
/// 2. Overlap: the requested range must not intersect any accepted
///    leave's effective range `[start_date, approved_end_date ?? end_date]`.
///    A reapplication excludes the application it reapplies against and
///    must cover exactly that application's unapproved remainder window.
/// 3. Per-request cap for the selected type.
/// 4. Split: paid days come from the type's remaining balance (treated as
///    zero when negative); the rest fall to leave-without-pay, capped by
///    the free-mode type's own per-request limit when one is set.
///
/// The split always satisfies `paid_days + lwp_days == requested days`.
///
/// Callers persisting an application must re-run this against fresh state
/// inside the per-employee critical section; a result from an earlier
/// read is not trustworthy.
///
/// # Arguments
///
/// * `request` - The proposed leave request
/// * `policy` - The leave policy
/// * `balances` - The employee's current balances for the request's year
/// * `accepted` - The employee's Accepted applications
pub fn validate_and_split(
    request: &LeaveRequest,
    policy: &LeavePolicy,
    balances: &[LeaveTypeBalance],
    accepted: &[LeaveApplication],
) -> EngineResult<LeaveSplit> {
    if request.employee_id.trim().is_empty() {
        return Err(EngineError::Validation {
            field: "employee_id".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if request.reason.trim().is_empty() {
        return Err(EngineError::Validation {
            field: "reason".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    let leave_type = policy.get_type(&request.leave_type)?;

    let days = request.requested_days();
    if days <= 0 {
        return Err(EngineError::Validation {
            field: "end_date".to_string(),
            message: "must not be before start_date".to_string(),
        });
    }

    // A reapplication must target an accepted application of the same
    // type and cover exactly its unapproved remainder window.
    if let Some(target_id) = request.reapplied_from {
        let target = accepted
            .iter()
            .find(|app| app.id == target_id)
            .ok_or_else(|| EngineError::Validation {
                field: "reapplied_from".to_string(),
                message: format!("{} is not an accepted application for this employee", target_id),
            })?;

        if target.leave_type != request.leave_type {
            return Err(EngineError::Validation {
                field: "leave_type".to_string(),
                message: format!("reapplication must keep the original type '{}'", target.leave_type),
            });
        }

        let (window_start, window_end) =
            target.reapplication_window().ok_or_else(|| EngineError::Validation {
                field: "reapplied_from".to_string(),
                message: format!("{} has no unapproved remainder to reapply for", target_id),
            })?;

        if request.start_date != window_start || request.end_date != window_end {
            return Err(EngineError::Validation {
                field: "start_date".to_string(),
                message: format!(
                    "reapplication must cover {} to {}",
                    window_start, window_end
                ),
            });
        }
    }

    let conflicts: Vec<_> = accepted
        .iter()
        .filter(|app| Some(app.id) != request.reapplied_from)
        .map(|app| app.effective_range())
        .filter(|(start, end)| {
            ranges_overlap(request.start_date, request.end_date, *start, *end)
        })
        .collect();
    if !conflicts.is_empty() {
        return Err(EngineError::OverlappingLeave { conflicts });
    }

    if let Some(max) = leave_type.max_per_request {
        if days > i64::from(max) {
            return Err(EngineError::RequestCapExceeded {
                leave_type: leave_type.code.clone(),
                requested: days,
                max,
            });
        }
    }

    let split = match leave_type.mode {
        LeaveMode::Free => LeaveSplit {
            paid_days: 0,
            lwp_days: days,
        },
        LeaveMode::Paid => {
            let remaining = balances
                .iter()
                .find(|b| b.leave_type == leave_type.code)
                .map(|b| b.days_remaining)
                .unwrap_or(leave_type.normal_days);
            let paid_days = days.min(remaining.max(0));
            LeaveSplit {
                paid_days,
                lwp_days: days - paid_days,
            }
        }
    };

    // Days spilling past the paid balance are themselves a leave-without-pay
    // request and honor that type's own cap.
    if split.lwp_days > 0 && leave_type.mode == LeaveMode::Paid {
        if let Some(free_type) = policy.free_type() {
            if let Some(max) = free_type.max_per_request {
                if split.lwp_days > i64::from(max) {
                    return Err(EngineError::RequestCapExceeded {
                        leave_type: free_type.code.clone(),
                        requested: split.lwp_days,
                        max,
                    });
                }
            }
        }
    }

    Ok(split)
}
