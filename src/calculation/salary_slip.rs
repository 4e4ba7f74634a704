//! Salary slip aggregation.
//!
//! Combines a saved salary record (when one exists) or a base-salary
//! fallback with the month's leave-day counts into a displayable payslip.
//! Monetary fields on the slip are rounded to two places; everything
//! upstream stays exact.

use crate::config::{LeaveMode, LeavePolicy};
use crate::error::EngineResult;
use crate::models::{
    EmployeeProfile, LeaveApplication, LeaveStatus, MonthlyLeaveDays, SalaryRecord, SalarySlip,
    SlipStatus,
};
use rust_decimal::Decimal;

use super::day_math::{days_in_month, days_within_month};

/// Buckets an employee's accepted leave days falling inside one calendar
/// month into paid and unpaid counts.
///
/// Each accepted leave's effective range `[start_date, approved_end_date
/// ?? end_date]` is clipped to the month; the overlap is bucketed by the
/// leave type's mode. Types no longer in the policy count as paid.
pub fn leave_days_in_month(
    applications: &[LeaveApplication],
    policy: &LeavePolicy,
    year: i32,
    month: u32,
) -> MonthlyLeaveDays {
    let mut counts = MonthlyLeaveDays::default();

    for app in applications {
        if app.status != LeaveStatus::Accepted {
            continue;
        }
        let (start, end) = app.effective_range();
        let days = days_within_month(start, end, year, month);
        if days == 0 {
            continue;
        }

        let is_free = policy
            .leave_types()
            .iter()
            .find(|t| t.code == app.leave_type)
            .map(|t| t.mode == LeaveMode::Free)
            .unwrap_or(false);
        if is_free {
            counts.unpaid_days += days;
        } else {
            counts.paid_days += days;
        }
    }

    counts
}

/// Builds the payslip for one employee and month.
///
/// With a saved record the slip carries the record's components and
/// totals. Without one, the slip is estimated: gross is the base salary
/// and the only deduction is the unpaid-leave days priced at the base
/// salary's daily rate for that month.
pub fn build_slip(
    employee: &EmployeeProfile,
    year: i32,
    month: u32,
    record: Option<&SalaryRecord>,
    leave_days: MonthlyLeaveDays,
) -> EngineResult<SalarySlip> {
    match record {
        Some(record) => Ok(SalarySlip {
            employee_id: employee.id.clone(),
            month,
            year,
            status: SlipStatus::Generated,
            components: record
                .components
                .iter()
                .map(|line| {
                    let mut line = line.clone();
                    line.amount = line.amount.round_dp(2);
                    line
                })
                .collect(),
            basic_salary: record.basic_salary.round_dp(2),
            gross_salary: record.gross_salary.round_dp(2),
            net_salary: record.net_salary.round_dp(2),
            leave_days,
        }),
        None => {
            let total_days = Decimal::from(days_in_month(year, month)?);
            let daily_rate = employee.base_salary / total_days;
            let deduction = daily_rate * Decimal::from(leave_days.unpaid_days);

            Ok(SalarySlip {
                employee_id: employee.id.clone(),
                month,
                year,
                status: SlipStatus::NotGenerated,
                components: Vec::new(),
                basic_salary: employee.base_salary.round_dp(2),
                gross_salary: employee.base_salary.round_dp(2),
                net_salary: (employee.base_salary - deduction).round_dp(2),
                leave_days,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FineRule, LeaveFrequency, LeaveType, PolicyMetadata};
    use crate::models::{RecordStatus, SalaryComponentLine};
    use chrono::{NaiveDate, Utc};
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

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
                    code: "lwp".to_string(),
                    name: "Leave Without Pay".to_string(),
                    mode: LeaveMode::Free,
                    frequency: LeaveFrequency::Yearly,
                    max_per_request: None,
                    normal_days: 0,
                    is_active: true,
                },
            ],
            FineRule::default(),
        )
    }

    fn create_test_employee() -> EmployeeProfile {
        EmployeeProfile {
            id: "emp_001".to_string(),
            name: "Asha Verma".to_string(),
            base_salary: dec("31000"),
            joined_on: date(2022, 4, 1),
        }
    }

    fn accepted_app(leave_type: &str, start: NaiveDate, end: NaiveDate) -> LeaveApplication {
        let days = (end - start).num_days() + 1;
        LeaveApplication {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            leave_type: leave_type.to_string(),
            start_date: start,
            end_date: end,
            reason: "test".to_string(),
            requested_days: days,
            approved_days: days,
            approved_end_date: Some(end),
            paid_days: days,
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

    #[test]
    fn test_leave_days_bucketed_by_mode() {
        let policy = create_test_policy();
        let apps = vec![
            accepted_app("casual", date(2024, 3, 4), date(2024, 3, 6)),
            accepted_app("lwp", date(2024, 3, 11), date(2024, 3, 12)),
        ];

        let counts = leave_days_in_month(&apps, &policy, 2024, 3);

        assert_eq!(counts.paid_days, 3);
        assert_eq!(counts.unpaid_days, 2);
    }

    #[test]
    fn test_leave_days_clipped_to_month() {
        // Mar 30 - Apr 2: two days belong to March, two to April.
        let policy = create_test_policy();
        let apps = vec![accepted_app("casual", date(2024, 3, 30), date(2024, 4, 2))];

        let march = leave_days_in_month(&apps, &policy, 2024, 3);
        let april = leave_days_in_month(&apps, &policy, 2024, 4);

        assert_eq!(march.paid_days, 2);
        assert_eq!(april.paid_days, 2);
    }

    #[test]
    fn test_leave_days_use_approved_end_date() {
        let mut app = accepted_app("casual", date(2024, 3, 4), date(2024, 3, 10));
        app.approved_days = 3;
        app.approved_end_date = Some(date(2024, 3, 6));
        let policy = create_test_policy();

        let counts = leave_days_in_month(&[app], &policy, 2024, 3);
        assert_eq!(counts.paid_days, 3);
    }

    #[test]
    fn test_pending_leaves_do_not_count() {
        let mut app = accepted_app("casual", date(2024, 3, 4), date(2024, 3, 6));
        app.status = LeaveStatus::Pending;
        let policy = create_test_policy();

        let counts = leave_days_in_month(&[app], &policy, 2024, 3);
        assert_eq!(counts.paid_days, 0);
        assert_eq!(counts.unpaid_days, 0);
    }

    #[test]
    fn test_slip_from_saved_record() {
        let employee = create_test_employee();
        let record = SalaryRecord {
            employee_id: "emp_001".to_string(),
            month: 3,
            year: 2024,
            components: vec![SalaryComponentLine::flat("BASIC", dec("31000"), false)],
            basic_salary: dec("31000"),
            gross_salary: dec("40000"),
            net_salary: dec("36333.333333"),
            status: RecordStatus::Saved,
        };

        let slip = build_slip(
            &employee,
            2024,
            3,
            Some(&record),
            MonthlyLeaveDays::default(),
        )
        .unwrap();

        assert_eq!(slip.status, SlipStatus::Generated);
        assert_eq!(slip.gross_salary, dec("40000"));
        assert_eq!(slip.net_salary, dec("36333.33"));
        assert_eq!(slip.components.len(), 1);
    }

    #[test]
    fn test_fallback_slip_deducts_unpaid_days_at_daily_rate() {
        // 31000 over January's 31 days is 1000/day; two unpaid days.
        let employee = create_test_employee();
        let leave_days = MonthlyLeaveDays {
            paid_days: 1,
            unpaid_days: 2,
        };

        let slip = build_slip(&employee, 2024, 1, None, leave_days).unwrap();

        assert_eq!(slip.status, SlipStatus::NotGenerated);
        assert_eq!(slip.gross_salary, dec("31000"));
        assert_eq!(slip.net_salary, dec("29000"));
        assert!(slip.components.is_empty());
        assert_eq!(slip.leave_days.unpaid_days, 2);
    }

    #[test]
    fn test_fallback_slip_without_unpaid_days_pays_full_base() {
        let employee = create_test_employee();

        let slip = build_slip(&employee, 2024, 2, None, MonthlyLeaveDays::default()).unwrap();

        assert_eq!(slip.net_salary, dec("31000"));
    }

    #[test]
    fn test_fallback_slip_rounds_at_boundary() {
        let mut employee = create_test_employee();
        employee.base_salary = dec("30000");
        let leave_days = MonthlyLeaveDays {
            paid_days: 0,
            unpaid_days: 1,
        };

        // 30000 / 31 = 967.74193...; net = 29032.26 after rounding.
        let slip = build_slip(&employee, 2024, 1, None, leave_days).unwrap();
        assert_eq!(slip.net_salary, dec("29032.26"));
    }

    #[test]
    fn test_invalid_month_rejected() {
        let employee = create_test_employee();
        let result = build_slip(&employee, 2024, 13, None, MonthlyLeaveDays::default());
        assert!(result.is_err());
    }
}
