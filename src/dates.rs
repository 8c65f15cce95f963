//! Parsing and formatting of the day-first display date format used
//! throughout the database and the HTML views.
//!
//! Dates are stored as `DD/MM/YYYY` strings. Records entered by hand over the
//! years contain blank and malformed dates, so parsing is lenient: anything
//! that is not a valid calendar date is treated as "no date" rather than an
//! error.

use time::{Date, Month};

/// Parse a `DD/MM/YYYY` string into a [Date].
///
/// Returns `None` for empty, malformed or out-of-range dates (e.g. `"32/01/2024"`).
pub fn parse_display_date(text: &str) -> Option<Date> {
    let (day, month, year) = sscanf::sscanf!(text.trim(), "{u8}/{u8}/{i32}")?;
    let month = Month::try_from(month).ok()?;

    Date::from_calendar_date(year, month, day).ok()
}

/// Format a [Date] as a `DD/MM/YYYY` string.
pub fn format_display_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        date.month() as u8,
        date.year()
    )
}

/// Whether `date` falls in the same calendar month as `today`.
///
/// A missing date is never in the current month.
pub fn is_current_month(date: Option<Date>, today: Date) -> bool {
    match date {
        Some(date) => date.year() == today.year() && date.month() == today.month(),
        None => false,
    }
}

/// Whether `date` is strictly before `today`.
///
/// A missing date is not considered past: a membership with an unreadable
/// expiry date should not show up as expired.
pub fn is_past(date: Option<Date>, today: Date) -> bool {
    match date {
        Some(date) => date < today,
        None => false,
    }
}


#[cfg(test)]
mod month_predicate_tests {
    use time::macros::date;

    use super::{is_current_month, is_past, parse_display_date};

    #[test]
    fn same_month_is_current() {
        let today = date!(2024 - 03 - 15);
        assert!(is_current_month(parse_display_date("01/03/2024"), today));
    }

    #[test]
    fn same_month_different_year_is_not_current() {
        let today = date!(2024 - 03 - 15);
        assert!(!is_current_month(parse_display_date("01/03/2023"), today));
    }

    #[test]
    fn different_month_is_not_current() {
        let today = date!(2024 - 03 - 15);
        assert!(!is_current_month(parse_display_date("01/04/2024"), today));
    }

    #[test]
    fn missing_date_is_not_current() {
        let today = date!(2024 - 03 - 15);
        assert!(!is_current_month(None, today));
    }

    #[test]
    fn yesterday_is_past() {
        let today = date!(2024 - 03 - 15);
        assert!(is_past(parse_display_date("14/03/2024"), today));
    }

    #[test]
    fn today_is_not_past() {
        let today = date!(2024 - 03 - 15);
        assert!(!is_past(parse_display_date("15/03/2024"), today));
    }

    #[test]
    fn missing_date_is_not_past() {
        let today = date!(2024 - 03 - 15);
        assert!(!is_past(None, today));
    }
}
