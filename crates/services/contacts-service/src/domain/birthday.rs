//! Upcoming birthday calculation.

use chrono::{Datelike, NaiveDate};

use super::Contact;
use crate::config::BIRTHDAY_WINDOW_DAYS;

/// The date `date_of_birth` falls on in `year`.
///
/// February 29 birthdays are observed on February 28 in non-leap years.
pub fn birthday_in_year(date_of_birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    date_of_birth
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

/// Days from `today` until this year's birthday (negative when it has passed).
pub fn days_until_birthday(date_of_birth: NaiveDate, today: NaiveDate) -> Option<i64> {
    birthday_in_year(date_of_birth, today.year()).map(|day| (day - today).num_days())
}

/// Whether this year's birthday is between today and the window end, inclusive.
///
/// Birthdays in early January are not seen from late December.
pub fn is_upcoming(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    days_until_birthday(date_of_birth, today)
        .is_some_and(|days| (0..=BIRTHDAY_WINDOW_DAYS).contains(&days))
}

/// Keep only contacts whose birthday is upcoming, preserving order.
pub fn upcoming_birthdays(contacts: Vec<Contact>, today: NaiveDate) -> Vec<Contact> {
    contacts
        .into_iter()
        .filter(|c| is_upcoming(c.date_of_birth, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let today = date(2024, 6, 10);
        assert!(is_upcoming(date(1990, 6, 10), today));
        assert!(is_upcoming(date(1990, 6, 13), today));
        assert!(is_upcoming(date(1990, 6, 17), today));
        assert!(!is_upcoming(date(1990, 6, 18), today));
        assert!(!is_upcoming(date(1990, 6, 9), today));
    }

    #[test]
    fn test_leap_day_in_common_year() {
        assert_eq!(birthday_in_year(date(2000, 2, 29), 2023), Some(date(2023, 2, 28)));
        assert_eq!(birthday_in_year(date(2000, 2, 29), 2024), Some(date(2024, 2, 29)));
        assert!(is_upcoming(date(2000, 2, 29), date(2023, 2, 25)));
    }

    #[test]
    fn test_no_year_wrap() {
        assert!(!is_upcoming(date(1985, 1, 2), date(2024, 12, 29)));
    }

    #[test]
    fn test_days_until() {
        assert_eq!(days_until_birthday(date(1990, 3, 5), date(2024, 3, 1)), Some(4));
        assert_eq!(days_until_birthday(date(1990, 3, 1), date(2024, 3, 5)), Some(-4));
    }
}
