//! Defines the route handler for the page that lists expenses as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BADGE_UNVERIFIED_STYLE, BADGE_VERIFIED_STYLE, FILTER_PILL_ACTIVE_STYLE, FILTER_PILL_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    timezone::current_local_date,
};

use super::{Expense, core::get_all_expenses, filter::ExpenseFilter};

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesViewState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpensesViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters accepted by the expenses page.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesQuery {
    /// The filter mode to apply, defaults to showing everything.
    #[serde(default)]
    pub filter: ExpenseFilter,
}

/// Render the list of expenses.
pub async fn get_expenses_page(
    State(state): State<ExpensesViewState>,
    Query(query): Query<ExpensesQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;
    let expenses = query.filter.apply(expenses, today);

    Ok(expenses_view(&expenses, query.filter).into_response())
}

fn filter_bar(active_filter: ExpenseFilter) -> Markup {
    html! {
        nav class="flex flex-wrap gap-2 mb-4"
        {
            @for filter in [
                ExpenseFilter::All,
                ExpenseFilter::ThisMonth,
                ExpenseFilter::UnverifiedThisMonth,
            ] {
                a
                    href={ (endpoints::EXPENSES_VIEW) "?filter=" (filter.as_query_value()) }
                    class=(if filter == active_filter { FILTER_PILL_ACTIVE_STYLE } else { FILTER_PILL_STYLE })
                {
                    (filter.label())
                }
            }
        }
    }
}

fn expense_row(index: usize, expense: &Expense) -> Markup {
    let verify_url = format_endpoint(endpoints::EXPENSE_VERIFY_VIEW, expense.id);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (index + 1) }
            td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE) { (expense.category) }
            td class=(TABLE_CELL_STYLE) { (expense.description) }
            td class=(TABLE_CELL_STYLE) { (expense.expense_date) }
            td class=(TABLE_CELL_STYLE)
            {
                @if expense.verified {
                    span class=(BADGE_VERIFIED_STYLE) { "Verified" }
                } @else {
                    span class=(BADGE_UNVERIFIED_STYLE) { "Unverified" }
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                @if !expense.verified {
                    a href=(verify_url) class=(LINK_STYLE) { "Verify" }
                }
            }
        }
    }
}

fn expenses_view(expenses: &[Expense], active_filter: ExpenseFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                h1 class="text-xl font-bold" { "Expenses" }

                (filter_bar(active_filter))

                div class="relative overflow-x-auto rounded"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Serial No." }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Expense Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Verified" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Action" }
                            }
                        }

                        tbody
                        {
                            @for (index, expense) in expenses.iter().enumerate() {
                                (expense_row(index, expense))
                            }

                            @if expenses.is_empty() {
                                tr
                                {
                                    td
                                        colspan="7"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No expenses match this filter."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Expenses", &[], &content)
}

// ============================================================================
// TESTS
// ============================================================================
