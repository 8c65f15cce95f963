//! Stat cards for the dashboard's headline figures.

use maud::{Markup, html};

use crate::html::currency_rounded_with_tooltip;

use super::aggregation::DashboardStats;

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

fn stat_card(label: &str, value: Markup) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
            p class="text-2xl font-semibold" data-stat=(label) { (value) }
        }
    }
}

fn count_value(count: usize) -> Markup {
    html! { (count) }
}

/// Renders the grid of headline figures.
///
/// Money cards show a rounded figure with the exact amount in the tooltip.
pub(super) fn stat_cards_view(stats: &DashboardStats) -> Markup {
    html! {
        section class="w-full mx-auto mb-4"
        {
            h2 class="text-xl font-semibold mb-4" { "General Statistics" }

            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (stat_card("Active Students", count_value(stats.active_students)))
                (stat_card("Collected This Month", currency_rounded_with_tooltip(stats.collected_this_month)))
                (stat_card("Cash This Month", currency_rounded_with_tooltip(stats.cash_this_month)))
                (stat_card("Transferred (Verified)", currency_rounded_with_tooltip(stats.transferred_verified)))
                (stat_card("Cash Due", currency_rounded_with_tooltip(stats.cash_due)))
                (stat_card("Verified Expenses", currency_rounded_with_tooltip(stats.verified_expenses)))
                (stat_card("Expired Memberships", count_value(stats.expired_memberships)))
                (stat_card("Expired Full Shift", count_value(stats.expired_full_shift)))
            }
        }
    }
}

#[cfg(test)]
mod stat_cards_tests {
    use scraper::{Html, Selector};

    use super::{DashboardStats, stat_cards_view};

    #[test]
    fn cards_show_counts_and_currency() {
        let stats = DashboardStats {
            active_students: 12,
            collected_this_month: 15000.0,
            cash_this_month: 6000.0,
            transferred_verified: 4000.0,
            cash_due: 2000.0,
            verified_expenses: 750.0,
            expired_memberships: 3,
            expired_full_shift: 1,
        };

        let fragment = Html::parse_fragment(&stat_cards_view(&stats).into_string());

        let value_of = |label: &str| {
            let selector = Selector::parse(&format!("[data-stat='{label}']")).unwrap();
            fragment
                .select(&selector)
                .next()
                .unwrap_or_else(|| panic!("missing card {label}"))
                .text()
                .collect::<String>()
        };

        assert_eq!(value_of("Active Students"), "12");
        assert_eq!(value_of("Collected This Month"), "₹15,000");
        assert_eq!(value_of("Expired Memberships"), "3");
    }

    #[test]
    fn negative_cash_due_renders_signed() {
        let stats = DashboardStats {
            cash_due: -400.0,
            ..DashboardStats::default()
        };

        let rendered = stat_cards_view(&stats).into_string();

        assert!(rendered.contains("-₹400"), "got {rendered}");
    }
}
