//! Named filter modes for the bookings list.

use serde::Deserialize;
use time::Date;

use crate::dates::{is_current_month, parse_display_date};

use super::Booking;

/// The named filter modes offered on the bookings page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingFilter {
    /// Every booking.
    #[default]
    All,
    /// Bookings dated in the current month.
    ThisMonth,
    /// Unverified bookings dated in the current month.
    UnverifiedThisMonth,
}

impl BookingFilter {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ThisMonth => "this-month",
            Self::UnverifiedThisMonth => "unverified-this-month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Bookings",
            Self::ThisMonth => "This Month",
            Self::UnverifiedThisMonth => "Unverified This Month",
        }
    }

    /// Apply this filter mode to the full booking set.
    pub fn apply(self, bookings: Vec<Booking>, today: Date) -> Vec<Booking> {
        match self {
            Self::All => bookings,
            Self::ThisMonth => bookings
                .into_iter()
                .filter(|booking| {
                    is_current_month(parse_display_date(&booking.booking_date), today)
                })
                .collect(),
            Self::UnverifiedThisMonth => bookings
                .into_iter()
                .filter(|booking| {
                    !booking.verified
                        && is_current_month(parse_display_date(&booking.booking_date), today)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod booking_filter_tests {
    use time::macros::date;

    use crate::booking::core::sample_booking;

    use super::BookingFilter;

    #[test]
    fn this_month_excludes_other_months_and_malformed_dates() {
        let today = date!(2026 - 02 - 20);
        let mut current = sample_booking(1);
        current.booking_date = "05/02/2026".to_owned();
        let mut last_month = sample_booking(2);
        last_month.booking_date = "05/01/2026".to_owned();
        let mut malformed = sample_booking(3);
        malformed.booking_date = "not a date".to_owned();

        let filtered =
            BookingFilter::ThisMonth.apply(vec![current.clone(), last_month, malformed], today);

        assert_eq!(filtered, vec![current]);
    }

    #[test]
    fn unverified_this_month_is_a_subset_of_this_month() {
        let today = date!(2026 - 02 - 20);
        let mut unverified = sample_booking(1);
        unverified.booking_date = "05/02/2026".to_owned();
        unverified.verified = false;
        let mut verified = sample_booking(2);
        verified.booking_date = "05/02/2026".to_owned();
        verified.verified = true;
        let mut unverified_old = sample_booking(3);
        unverified_old.booking_date = "05/01/2026".to_owned();
        unverified_old.verified = false;

        let filtered = BookingFilter::UnverifiedThisMonth
            .apply(vec![unverified.clone(), verified, unverified_old], today);

        assert_eq!(filtered, vec![unverified]);
    }

    #[test]
    fn all_preserves_input_order() {
        let today = date!(2026 - 02 - 20);
        let bookings = vec![sample_booking(1), sample_booking(2)];

        let filtered = BookingFilter::All.apply(bookings.clone(), today);

        assert_eq!(filtered, bookings);
    }
}
