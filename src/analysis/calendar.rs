//! Calendar helpers
//!
//! Month lengths, elapsed-day counting, and Sunday-anchored week starts.

use chrono::{Datelike, Days, NaiveDate};

/// Number of days in a calendar month, or None for an invalid month
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next_first - first).num_days() as u32)
}

/// Days of the target month counted as already passed relative to `today`
///
/// A fully-future month has 0 elapsed days, a past month its full length,
/// and the current month the current day-of-month.
pub fn days_passed_in_month(month: u32, year: i32, today: NaiveDate) -> u32 {
    if year > today.year() || (year == today.year() && month > today.month()) {
        return 0;
    }

    if year < today.year() || (year == today.year() && month < today.month()) {
        return days_in_month(month, year).unwrap_or(0);
    }

    today.day()
}

/// The Sunday starting the week containing `date`
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let offset = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(11, 2024), Some(30));
        assert_eq!(days_in_month(12, 2024), Some(31));
        assert_eq!(days_in_month(2, 2024), Some(29)); // leap year
        assert_eq!(days_in_month(2, 2023), Some(28));
        assert_eq!(days_in_month(13, 2024), None);
        assert_eq!(days_in_month(0, 2024), None);
    }

    #[test]
    fn test_days_passed_future_month() {
        assert_eq!(days_passed_in_month(12, 2024, date(2024, 11, 15)), 0);
        assert_eq!(days_passed_in_month(1, 2025, date(2024, 11, 15)), 0);
    }

    #[test]
    fn test_days_passed_past_month() {
        assert_eq!(days_passed_in_month(11, 2024, date(2024, 12, 1)), 30);
        assert_eq!(days_passed_in_month(11, 2024, date(2025, 3, 10)), 30);
    }

    #[test]
    fn test_days_passed_current_month() {
        assert_eq!(days_passed_in_month(11, 2024, date(2024, 11, 18)), 18);
        assert_eq!(days_passed_in_month(11, 2024, date(2024, 11, 1)), 1);
    }

    #[test]
    fn test_week_start_is_sunday_anchored() {
        // 2024-11-01 is a Friday; its week starts Sunday 2024-10-27
        assert_eq!(week_start(date(2024, 11, 1)), Some(date(2024, 10, 27)));
        // A Sunday starts its own week
        assert_eq!(week_start(date(2024, 11, 3)), Some(date(2024, 11, 3)));
        assert_eq!(week_start(date(2024, 11, 9)), Some(date(2024, 11, 3)));
    }
}
