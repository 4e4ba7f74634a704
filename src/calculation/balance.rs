//! Leave balance calculation.
//!
//! Produces the remaining days per paid leave type for one employee and
//! calendar year, from the policy entitlements and the employee's
//! accepted-leave history.

use chrono::Datelike;

use crate::config::{LeaveMode, LeavePolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveApplication, LeaveStatus, LeaveTypeBalance};

/// Calculates the per-type leave balances for one employee.
///
/// For every active paid leave type, the yearly entitlement is the
/// policy's `normal_days` and the taken count is the sum of
/// `approved_days` over the employee's Accepted applications of that type
/// whose leave starts in `year`. Free-mode (leave-without-pay) types are
/// excluded: they draw from no entitlement.
///
/// `days_remaining` is deliberately not clamped at zero. A balance that
/// went negative through an out-of-band grant is reported as-is; the
/// paid/unpaid split treats it as zero.
///
/// # Arguments
///
/// * `policy` - The leave policy to read entitlements from
/// * `applications` - The employee's leave applications (any status; only
///   Accepted ones count)
/// * `year` - The calendar year to aggregate over
///
/// # Returns
///
/// Balances in policy order, or `PolicyNotConfigured` when the policy has
/// no active leave types.
///
/// # Example
///
/// ```
/// use hr_engine::calculation::calculate_balances;
/// use hr_engine::config::{FineRule, LeavePolicy, PolicyMetadata};
///
/// let policy = LeavePolicy::new(
///     PolicyMetadata {
///         name: "default".to_string(),
///         version: "1".to_string(),
///     },
///     vec![],
///     FineRule::default(),
/// );
/// assert!(calculate_balances(&policy, &[], 2024).is_err());
/// ```
pub fn calculate_balances(
    policy: &LeavePolicy,
    applications: &[LeaveApplication],
    year: i32,
) -> EngineResult<Vec<LeaveTypeBalance>> {
    if !policy.is_configured() {
        return Err(EngineError::PolicyNotConfigured);
    }

    let balances = policy
        .active_types()
        .filter(|leave_type| leave_type.mode == LeaveMode::Paid)
        .map(|leave_type| {
            let days_taken: i64 = applications
                .iter()
                .filter(|app| {
                    app.status == LeaveStatus::Accepted
                        && app.leave_type == leave_type.code
                        && app.start_date.year() == year
                })
                .map(|app| app.approved_days)
                .sum();

            LeaveTypeBalance {
                leave_type: leave_type.code.clone(),
                total_days: leave_type.normal_days,
                days_taken,
                days_remaining: leave_type.normal_days - days_taken,
            }
        })
        .collect();

    Ok(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FineRule, LeaveFrequency, LeaveType, PolicyMetadata};
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn create_test_policy() -> LeavePolicy {
        LeavePolicy::new(
            PolicyMetadata {
                name: "test".to_string(),
                version: "1".to_string(),
            },
            vec![
                LeaveType {
                    code: "casual".to_string(),
                    name: "Casual Leave".to_string(),
                    mode: LeaveMode::Paid,
                    frequency: LeaveFrequency::Yearly,
                    max_per_request: Some(5),
                    normal_days: 12,
                    is_active: true,
                },
                LeaveType {
                    code: "sick".to_string(),
                    name: "Sick Leave".to_string(),
                    mode: LeaveMode::Paid,
                    frequency: LeaveFrequency::Yearly,
                    max_per_request: None,
                    normal_days: 10,
                    is_active: true,
                },
                LeaveType {
                    code: "lwp".to_string(),
                    name: "Leave Without Pay".to_string(),
                    mode: LeaveMode::Free,
                    frequency: LeaveFrequency::Yearly,
                    max_per_request: Some(30),
                    normal_days: 0,
                    is_active: true,
                },
            ],
            FineRule::default(),
        )
    }

    fn accepted_app(leave_type: &str, start: NaiveDate, approved_days: i64) -> LeaveApplication {
        LeaveApplication {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            leave_type: leave_type.to_string(),
            start_date: start,
            end_date: start + chrono::Duration::days(approved_days - 1),
            reason: "test".to_string(),
            requested_days: approved_days,
            approved_days,
            approved_end_date: Some(start + chrono::Duration::days(approved_days - 1)),
            paid_days: approved_days,
            lwp_days: 0,
            status: LeaveStatus::Accepted,
            is_fine_applicable: false,
            fine_amount: Decimal::ZERO,
            hr_message: None,
            applied_at: Utc::now(),
            reviewed_by: Some("hr_001".to_string()),
            reviewed_at: Some(Utc::now()),
            is_reapplication: false,
            reapplied_from: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_entitlement_with_no_history() {
        let policy = create_test_policy();
        let balances = calculate_balances(&policy, &[], 2024).unwrap();

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].leave_type, "casual");
        assert_eq!(balances[0].days_remaining, 12);
        assert_eq!(balances[1].leave_type, "sick");
        assert_eq!(balances[1].days_remaining, 10);
    }

    #[test]
    fn test_taken_days_reduce_remaining() {
        let policy = create_test_policy();
        let apps = vec![
            accepted_app("casual", date(2024, 2, 5), 3),
            accepted_app("casual", date(2024, 6, 10), 2),
            accepted_app("sick", date(2024, 3, 1), 4),
        ];

        let balances = calculate_balances(&policy, &apps, 2024).unwrap();

        let casual = balances.iter().find(|b| b.leave_type == "casual").unwrap();
        assert_eq!(casual.days_taken, 5);
        assert_eq!(casual.days_remaining, 7);

        let sick = balances.iter().find(|b| b.leave_type == "sick").unwrap();
        assert_eq!(sick.days_taken, 4);
        assert_eq!(sick.days_remaining, 6);
    }

    #[test]
    fn test_other_years_do_not_count() {
        let policy = create_test_policy();
        let apps = vec![
            accepted_app("casual", date(2023, 11, 5), 6),
            accepted_app("casual", date(2024, 2, 5), 3),
        ];

        let balances = calculate_balances(&policy, &apps, 2024).unwrap();
        let casual = balances.iter().find(|b| b.leave_type == "casual").unwrap();
        assert_eq!(casual.days_taken, 3);
    }

    #[test]
    fn test_pending_and_denied_do_not_count() {
        let policy = create_test_policy();
        let mut pending = accepted_app("casual", date(2024, 2, 5), 3);
        pending.status = LeaveStatus::Pending;
        pending.approved_days = 0;
        let mut denied = accepted_app("casual", date(2024, 3, 5), 2);
        denied.status = LeaveStatus::Denied;
        denied.approved_days = 0;

        let balances = calculate_balances(&policy, &[pending, denied], 2024).unwrap();
        let casual = balances.iter().find(|b| b.leave_type == "casual").unwrap();
        assert_eq!(casual.days_taken, 0);
        assert_eq!(casual.days_remaining, 12);
    }

    #[test]
    fn test_free_mode_type_has_no_balance_row() {
        let policy = create_test_policy();
        let balances = calculate_balances(&policy, &[], 2024).unwrap();
        assert!(balances.iter().all(|b| b.leave_type != "lwp"));
    }

    #[test]
    fn test_remaining_goes_negative_when_over_allocated() {
        let policy = create_test_policy();
        let apps = vec![
            accepted_app("sick", date(2024, 1, 8), 7),
            accepted_app("sick", date(2024, 5, 6), 7),
        ];

        let balances = calculate_balances(&policy, &apps, 2024).unwrap();
        let sick = balances.iter().find(|b| b.leave_type == "sick").unwrap();
        assert_eq!(sick.days_taken, 14);
        assert_eq!(sick.days_remaining, -4);
    }

    #[test]
    fn test_unconfigured_policy_fails() {
        let policy = LeavePolicy::new(
            PolicyMetadata {
                name: "empty".to_string(),
                version: "1".to_string(),
            },
            vec![],
            FineRule::default(),
        );

        let result = calculate_balances(&policy, &[], 2024);
        assert!(matches!(result, Err(EngineError::PolicyNotConfigured)));
    }
}
