//! Calendar day arithmetic shared by the leave and payroll rules.
//!
//! All day counts in the engine are inclusive: a leave from Monday to
//! Monday is one day. Dates are plain calendar dates; no timezone
//! arithmetic happens within a day.

use chrono::{Duration, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Returns the inclusive day count between two dates.
///
/// Negative when `end` precedes `start`.
///
/// # Example
///
/// ```
/// use hr_engine::calculation::inclusive_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(inclusive_days(start, end), 10);
/// ```
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Returns true when the inclusive ranges `[a_start, a_end]` and
/// `[b_start, b_end]` share at least one day.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Returns the first and last day of the given calendar month.
///
/// Fails with a validation error for a month outside 1-12.
pub fn month_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::Validation {
        field: "month".to_string(),
        message: format!("{}-{} is not a valid calendar month", year, month),
    })?;

    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| EngineError::Validation {
        field: "month".to_string(),
        message: format!("{}-{} is not a valid calendar month", year, month),
    })?;

    Ok((first, next_first - Duration::days(1)))
}

/// Returns the number of days in the given calendar month.
pub fn days_in_month(year: i32, month: u32) -> EngineResult<i64> {
    let (first, last) = month_bounds(year, month)?;
    Ok(inclusive_days(first, last))
}

/// Clips the inclusive range `[start, end]` to the given month and
/// returns the overlapping day count, zero when the range misses the
/// month entirely.
pub fn days_within_month(start: NaiveDate, end: NaiveDate, year: i32, month: u32) -> i64 {
    let Ok((month_first, month_last)) = month_bounds(year, month) else {
        return 0;
    };
    let clipped_start = start.max(month_first);
    let clipped_end = end.min(month_last);
    if clipped_start > clipped_end {
        return 0;
    }
    inclusive_days(clipped_start, clipped_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inclusive_days_single_day() {
        assert_eq!(inclusive_days(date(2024, 1, 5), date(2024, 1, 5)), 1);
    }

    #[test]
    fn test_inclusive_days_span() {
        assert_eq!(inclusive_days(date(2024, 1, 1), date(2024, 1, 10)), 10);
    }

    #[test]
    fn test_inclusive_days_negative_when_reversed() {
        assert!(inclusive_days(date(2024, 1, 10), date(2024, 1, 1)) < 0);
    }

    #[test]
    fn test_ranges_overlap_shared_day() {
        assert!(ranges_overlap(
            date(2024, 1, 1),
            date(2024, 1, 5),
            date(2024, 1, 5),
            date(2024, 1, 9),
        ));
    }

    #[test]
    fn test_ranges_overlap_disjoint() {
        assert!(!ranges_overlap(
            date(2024, 1, 1),
            date(2024, 1, 5),
            date(2024, 1, 6),
            date(2024, 1, 9),
        ));
    }

    #[test]
    fn test_ranges_overlap_containment() {
        assert!(ranges_overlap(
            date(2024, 1, 1),
            date(2024, 1, 31),
            date(2024, 1, 10),
            date(2024, 1, 12),
        ));
    }

    #[test]
    fn test_month_bounds_regular_month() {
        let (first, last) = month_bounds(2024, 4).unwrap();
        assert_eq!(first, date(2024, 4, 1));
        assert_eq!(last, date(2024, 4, 30));
    }

    #[test]
    fn test_month_bounds_december() {
        let (first, last) = month_bounds(2023, 12).unwrap();
        assert_eq!(first, date(2023, 12, 1));
        assert_eq!(last, date(2023, 12, 31));
    }

    #[test]
    fn test_month_bounds_invalid_month() {
        assert!(month_bounds(2024, 13).is_err());
        assert!(month_bounds(2024, 0).is_err());
    }

    #[test]
    fn test_days_in_month_leap_february() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
    }

    #[test]
    fn test_days_within_month_fully_inside() {
        assert_eq!(
            days_within_month(date(2024, 3, 10), date(2024, 3, 12), 2024, 3),
            3
        );
    }

    #[test]
    fn test_days_within_month_spanning_boundary() {
        // Jan 30 - Feb 2 leaves two days in January and two in February.
        assert_eq!(
            days_within_month(date(2024, 1, 30), date(2024, 2, 2), 2024, 1),
            2
        );
        assert_eq!(
            days_within_month(date(2024, 1, 30), date(2024, 2, 2), 2024, 2),
            2
        );
    }

    #[test]
    fn test_days_within_month_outside() {
        assert_eq!(
            days_within_month(date(2024, 1, 1), date(2024, 1, 5), 2024, 3),
            0
        );
    }
}
