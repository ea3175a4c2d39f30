//! Membership tenure in whole calendar months

use chrono::{Datelike, NaiveDate};

use crate::member::Member;

/// Whole months from enrollment to `now`, ignoring the day of month
///
/// A member enrolled on the 31st counts a full month on the 1st of the
/// next month. Never negative.
pub fn tenure_months(enrollment_date: NaiveDate, now: NaiveDate) -> u32 {
    let years = now.year() - enrollment_date.year();
    let months = now.month() as i32 - enrollment_date.month() as i32;
    (years * 12 + months).max(0) as u32
}

/// Tenure of a member as of `now`
pub fn compute_tenure_months(member: &Member, now: NaiveDate) -> u32 {
    tenure_months(member.enrollment_date, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_whole_months() {
        assert_eq!(tenure_months(date(2010, 6, 1), date(2024, 6, 1)), 168);
        assert_eq!(tenure_months(date(2023, 11, 15), date(2024, 2, 10)), 3);
    }

    #[test]
    fn test_day_of_month_ignored() {
        // 1 day apart across a month boundary still counts as a month
        assert_eq!(tenure_months(date(2024, 1, 31), date(2024, 2, 1)), 1);
        // 30 days within the same month counts as zero
        assert_eq!(tenure_months(date(2024, 3, 1), date(2024, 3, 31)), 0);
    }

    #[test]
    fn test_future_enrollment_clamped() {
        assert_eq!(tenure_months(date(2025, 1, 1), date(2024, 6, 1)), 0);
    }

    #[test]
    fn test_member_tenure() {
        let member = Member::new("m1", date(2020, 9, 20), 10_000.0);
        assert_eq!(compute_tenure_months(&member, date(2021, 9, 1)), 12);
    }
}
