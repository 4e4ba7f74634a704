//! Fine assessment for frequent monthly leave.
//!
//! An application attracts a fine when the employee already has more than
//! a threshold number of accepted leaves inside the application's calendar
//! month. The assessment runs once, at apply time, and the result is
//! stored on the application.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::FineRule;
use crate::models::{LeaveApplication, LeaveStatus};

/// The outcome of a fine assessment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FineAssessment {
    /// Whether the fine applies.
    pub applicable: bool,
    /// The fine amount; zero when not applicable.
    pub amount: Decimal,
}

impl FineAssessment {
    /// An assessment with no fine.
    pub fn none() -> Self {
        Self {
            applicable: false,
            amount: Decimal::ZERO,
        }
    }
}

/// Assesses the fine for a new application.
///
/// Counts the employee's *other* Accepted applications starting in the
/// same calendar month as `start_date`. At or past the rule's threshold,
/// the fine is `requested_days x daily_rate`.
///
/// # Example
///
/// ```
/// use hr_engine::calculation::assess_fine;
/// use hr_engine::config::FineRule;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
/// let assessment = assess_fine(&FineRule::default(), 3, start, &[]);
/// assert!(!assessment.applicable);
/// ```
pub fn assess_fine(
    rule: &FineRule,
    requested_days: i64,
    start_date: NaiveDate,
    applications: &[LeaveApplication],
) -> FineAssessment {
    let accepted_in_month = applications
        .iter()
        .filter(|app| {
            app.status == LeaveStatus::Accepted
                && app.start_date.year() == start_date.year()
                && app.start_date.month() == start_date.month()
        })
        .count();

    if accepted_in_month < rule.monthly_threshold as usize {
        return FineAssessment::none();
    }

    FineAssessment {
        applicable: true,
        amount: Decimal::from(requested_days) * rule.daily_rate,
    }
}
