//! Named filter modes for the expenses list.

use serde::Deserialize;
use time::Date;

use crate::dates::{is_current_month, parse_display_date};

use super::Expense;

/// The named filter modes offered on the expenses page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseFilter {
    /// Every expense.
    #[default]
    All,
    /// Expenses dated in the current month.
    ThisMonth,
    /// Unverified expenses dated in the current month.
    UnverifiedThisMonth,
}

impl ExpenseFilter {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ThisMonth => "this-month",
            Self::UnverifiedThisMonth => "unverified-this-month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Expenses",
            Self::ThisMonth => "This Month",
            Self::UnverifiedThisMonth => "Unverified This Month",
        }
    }

    /// Apply this filter mode to the full expense set.
    pub fn apply(self, expenses: Vec<Expense>, today: Date) -> Vec<Expense> {
        match self {
            Self::All => expenses,
            Self::ThisMonth => expenses
                .into_iter()
                .filter(|expense| {
                    is_current_month(parse_display_date(&expense.expense_date), today)
                })
                .collect(),
            Self::UnverifiedThisMonth => expenses
                .into_iter()
                .filter(|expense| {
                    !expense.verified
                        && is_current_month(parse_display_date(&expense.expense_date), today)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod expense_filter_tests {
    use time::macros::date;

    use crate::expense::core::sample_expense;

    use super::ExpenseFilter;

    #[test]
    fn this_month_excludes_other_months() {
        let today = date!(2026 - 02 - 20);
        let mut current = sample_expense("Electricity");
        current.expense_date = "10/02/2026".to_owned();
        let mut last_month = sample_expense("Supplies");
        last_month.expense_date = "10/01/2026".to_owned();

        let filtered = ExpenseFilter::ThisMonth.apply(vec![current.clone(), last_month], today);

        assert_eq!(filtered, vec![current]);
    }

    #[test]
    fn unverified_this_month_excludes_verified() {
        let today = date!(2026 - 02 - 20);
        let mut unverified = sample_expense("Electricity");
        unverified.expense_date = "10/02/2026".to_owned();
        let mut verified = sample_expense("Supplies");
        verified.expense_date = "10/02/2026".to_owned();
        verified.verified = true;

        let filtered =
            ExpenseFilter::UnverifiedThisMonth.apply(vec![unverified.clone(), verified], today);

        assert_eq!(filtered, vec![unverified]);
    }

    #[test]
    fn malformed_dates_never_match_month_filters() {
        let today = date!(2026 - 02 - 20);
        let mut malformed = sample_expense("Electricity");
        malformed.expense_date = "29/13/2026".to_owned();

        let filtered = ExpenseFilter::ThisMonth.apply(vec![malformed], today);

        assert!(filtered.is_empty(), "want no matches, got {filtered:?}");
    }
}
