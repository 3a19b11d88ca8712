//! Pure calendar helpers shared by the report engine.
//!
//! Everything here is a side-effect-free function over `chrono` types.
//! Timestamps are always compared on the UTC scale; a "day" is the
//! civil date a timestamp falls on in UTC.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc, Weekday};

/// Returns the calendar date a timestamp falls on.
pub fn as_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Returns true if both timestamps fall on the same calendar date.
pub fn same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Returns true if `a` falls on the same calendar date as `b` or an earlier one.
/// Time of day is ignored.
pub fn day_before_or_equal(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() <= b.date_naive()
}

/// Advances a timestamp by one calendar day, keeping the time of day.
pub fn next_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts + TimeDelta::days(1)
}

/// Returns true if `ts` lies within `[start, end]`, both bounds inclusive.
pub fn in_range(start: DateTime<Utc>, end: DateTime<Utc>, ts: DateTime<Utc>) -> bool {
    start <= ts && ts <= end
}

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of days in the given month, or `None` if (year, month) is not
/// a valid Gregorian month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    Some(month_days(year, month)?.count() as u32)
}

/// Iterates over every calendar date of the given month in ascending
/// order, or `None` if (year, month) is not a valid Gregorian month.
pub fn month_days(year: i32, month: u32) -> Option<impl Iterator<Item = NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(
        first
            .iter_days()
            .take_while(move |date| date.year() == year && date.month() == month),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .expect("valid test timestamp")
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        assert!(same_day(ts(2022, 2, 1, 0, 0), ts(2022, 2, 1, 23, 59)));
        assert!(!same_day(ts(2022, 2, 1, 23, 59), ts(2022, 2, 2, 0, 0)));
    }

    #[test]
    fn day_ordering_is_date_only() {
        // Later time of day on an earlier date still sorts before.
        assert!(day_before_or_equal(ts(2022, 2, 1, 23, 0), ts(2022, 2, 2, 1, 0)));
        assert!(day_before_or_equal(ts(2022, 2, 1, 8, 0), ts(2022, 2, 1, 7, 0)));
        assert!(!day_before_or_equal(ts(2022, 2, 2, 0, 0), ts(2022, 2, 1, 23, 0)));
    }

    #[test]
    fn next_day_keeps_time_of_day() {
        assert_eq!(next_day(ts(2022, 2, 28, 8, 30)), ts(2022, 3, 1, 8, 30));
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let start = ts(2022, 2, 1, 8, 0);
        let end = ts(2022, 2, 1, 16, 0);
        assert!(in_range(start, end, start));
        assert!(in_range(start, end, end));
        assert!(in_range(start, end, ts(2022, 2, 1, 12, 0)));
        assert!(!in_range(start, end, ts(2022, 2, 1, 16, 1)));
        assert!(!in_range(start, end, ts(2022, 2, 1, 7, 59)));
    }

    #[test]
    fn weekend_detection() {
        let saturday = NaiveDate::from_ymd_opt(2022, 2, 5).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2022, 2, 6).unwrap();
        let monday = NaiveDate::from_ymd_opt(2022, 2, 7).unwrap();
        assert!(is_weekend(saturday));
        assert!(is_weekend(sunday));
        assert!(!is_weekend(monday));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2022, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2022, 12), Some(31));
        assert_eq!(days_in_month(2022, 13), None);
        assert_eq!(days_in_month(2022, 0), None);
    }

    #[test]
    fn month_days_are_ascending_and_complete() {
        let days: Vec<NaiveDate> = month_days(2022, 2).unwrap().collect();
        assert_eq!(days.len(), 28);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2022, 2, 1).unwrap());
        assert_eq!(days[27], NaiveDate::from_ymd_opt(2022, 2, 28).unwrap());
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
