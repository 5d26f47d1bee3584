//! Calendar arithmetic shared by the schedule and summary services.
//!
//! All helpers work on `NaiveDate`, i.e. on dates already truncated to
//! midnight. Weekdays use the 0 = Sunday .. 6 = Saturday numbering of the
//! card data model.

use chrono::{Datelike, Duration, NaiveDate};

/// Length of `month` in `year`, February included
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Calendar date of anything chrono can read a date from
pub fn date_of<D: Datelike>(value: &D) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(value.year(), value.month(), value.day())
}

/// Weekday number, 0 = Sunday
pub fn weekday_from_sunday<D: Datelike>(value: &D) -> u32 {
    value.weekday().num_days_from_sunday()
}

/// Year and month following the given one
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Year and month preceding the given one
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// The given day of month, reduced to the month's last day when the month is too short
pub fn clamped_day_in_month(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Whole calendar days from `from` to `to`, never negative
pub fn day_diff(from: NaiveDate, to: NaiveDate) -> u32 {
    let days = (to - from).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Monday of the week containing `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date - Duration::days(i64::from(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 1), 31);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn test_clamped_day_in_month() {
        assert_eq!(clamped_day_in_month(2023, 2, 31), Some(ymd(2023, 2, 28)));
        assert_eq!(clamped_day_in_month(2024, 2, 31), Some(ymd(2024, 2, 29)));
        assert_eq!(clamped_day_in_month(2023, 4, 31), Some(ymd(2023, 4, 30)));
        assert_eq!(clamped_day_in_month(2023, 5, 15), Some(ymd(2023, 5, 15)));
    }

    #[test]
    fn test_next_month_wraps_year() {
        assert_eq!(next_month(2023, 12), (2024, 1));
        assert_eq!(next_month(2023, 1), (2023, 2));
        assert_eq!(previous_month(2024, 1), (2023, 12));
        assert_eq!(previous_month(2024, 3), (2024, 2));
    }

    #[test]
    fn test_day_diff_floors_at_zero() {
        assert_eq!(day_diff(ymd(2024, 3, 1), ymd(2024, 3, 2)), 1);
        assert_eq!(day_diff(ymd(2024, 2, 28), ymd(2024, 3, 1)), 2);
        assert_eq!(day_diff(ymd(2024, 3, 2), ymd(2024, 3, 1)), 0);
    }

    #[test]
    fn test_start_of_week_is_monday() {
        // 2024-05-15 is a Wednesday
        assert_eq!(start_of_week(ymd(2024, 5, 15)), ymd(2024, 5, 13));
        assert_eq!(start_of_week(ymd(2024, 5, 13)), ymd(2024, 5, 13));
        // Sunday belongs to the week that started the previous Monday
        assert_eq!(start_of_week(ymd(2024, 5, 19)), ymd(2024, 5, 13));
    }

    #[test]
    fn test_weekday_from_sunday() {
        assert_eq!(weekday_from_sunday(&ymd(2024, 5, 19)), 0);
        assert_eq!(weekday_from_sunday(&ymd(2024, 5, 15)), 3);
        assert_eq!(weekday_from_sunday(&ymd(2024, 5, 18)), 6);
    }
}
