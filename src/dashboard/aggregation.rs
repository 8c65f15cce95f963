//! Pure aggregate statistics over the centre's records.
//!
//! Every date-scoped function takes an explicit `today` so the ambient clock
//! is consulted only at the handler layer.

use std::collections::HashMap;

use time::Date;

use crate::{
    booking::Booking,
    dates::{is_current_month, is_past, parse_display_date},
    expense::Expense,
    student::Student,
};

/// The shift name that marks an all-day membership.
pub(super) const FULL_SHIFT: &str = "Full Shift";

/// The label used in the shift distribution for students without a shift.
pub(super) const UNKNOWN_SHIFT: &str = "Unknown";

/// Revenue totals for the current month.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(super) struct MonthlyTotals {
    /// The total amount collected.
    pub amount: f64,
    /// The portion collected in cash.
    pub cash: f64,
}

/// Sum this month's bookings into total and cash-only figures.
pub(super) fn monthly_booking_totals(bookings: &[Booking], today: Date) -> MonthlyTotals {
    bookings
        .iter()
        .filter(|booking| is_current_month(parse_display_date(&booking.booking_date), today))
        .fold(MonthlyTotals::default(), |totals, booking| MonthlyTotals {
            amount: totals.amount + booking.amount,
            cash: totals.cash + booking.cash,
        })
}

/// Sum the online portion of this month's verified bookings.
pub(super) fn verified_transfer_total(bookings: &[Booking], today: Date) -> f64 {
    bookings
        .iter()
        .filter(|booking| {
            booking.verified
                && is_current_month(parse_display_date(&booking.booking_date), today)
        })
        .map(|booking| booking.online)
        .sum()
}

/// Sum this month's verified expenses.
pub(super) fn verified_expense_total(expenses: &[Expense], today: Date) -> f64 {
    expenses
        .iter()
        .filter(|expense| {
            expense.verified
                && is_current_month(parse_display_date(&expense.expense_date), today)
        })
        .map(|expense| expense.amount)
        .sum()
}

pub(super) fn count_active_students(students: &[Student]) -> usize {
    students.iter().filter(|student| student.active).count()
}

/// Count students whose membership lapsed before today.
pub(super) fn count_expired_students(students: &[Student], today: Date) -> usize {
    students
        .iter()
        .filter(|student| is_past(parse_display_date(&student.valid_upto), today))
        .count()
}

/// Count active full-shift students whose membership lapsed before today.
pub(super) fn count_expired_full_shift(students: &[Student], today: Date) -> usize {
    students
        .iter()
        .filter(|student| {
            student.active
                && student.shift_name == FULL_SHIFT
                && is_past(parse_display_date(&student.valid_upto), today)
        })
        .count()
}

/// The headline numbers shown on the dashboard cards.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct DashboardStats {
    /// Students currently marked active.
    pub active_students: usize,
    /// Total collected this month.
    pub collected_this_month: f64,
    /// Cash collected this month.
    pub cash_this_month: f64,
    /// Verified online transfers this month.
    pub transferred_verified: f64,
    /// Cash still on hand after verified transfers. Signed; negative means
    /// more was transferred than taken in cash.
    pub cash_due: f64,
    /// Verified expenses this month.
    pub verified_expenses: f64,
    /// Memberships that lapsed before today.
    pub expired_memberships: usize,
    /// Active full-shift members whose membership lapsed before today.
    pub expired_full_shift: usize,
}

/// Compute every dashboard card figure from the full record sets.
pub(super) fn build_dashboard_stats(
    students: &[Student],
    bookings: &[Booking],
    expenses: &[Expense],
    today: Date,
) -> DashboardStats {
    let totals = monthly_booking_totals(bookings, today);
    let transferred_verified = verified_transfer_total(bookings, today);

    DashboardStats {
        active_students: count_active_students(students),
        collected_this_month: totals.amount,
        cash_this_month: totals.cash,
        transferred_verified,
        cash_due: totals.cash - transferred_verified,
        verified_expenses: verified_expense_total(expenses, today),
        expired_memberships: count_expired_students(students, today),
        expired_full_shift: count_expired_full_shift(students, today),
    }
}

/// Count students per shift name, bucketing missing shifts under "Unknown".
pub(super) fn shift_distribution(students: &[Student]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();

    for student in students {
        let shift = if student.shift_name.trim().is_empty() {
            UNKNOWN_SHIFT
        } else {
            &student.shift_name
        };
        *counts.entry(shift.to_owned()).or_insert(0) += 1;
    }

    counts
}
