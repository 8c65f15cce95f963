//! Defines the route handler for the expense verification confirm page.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, PAGE_CONTAINER_STYLE, base, format_currency,
        loading_spinner,
    },
    navigation::NavBar,
};

use super::{Expense, core::get_expense};

/// The state needed for the expense verification confirm page.
#[derive(Debug, Clone)]
pub struct ExpenseVerifyViewState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseVerifyViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the confirmation page for verifying an expense.
pub async fn get_expense_verify_page(
    State(state): State<ExpenseVerifyViewState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = get_expense(expense_id, &connection)
        .inspect_err(|error| tracing::error!("could not get expense {expense_id}: {error}"))?;

    Ok(expense_verify_view(&expense).into_response())
}

fn detail_row(label: &str, value: &str) -> Markup {
    html! {
        p
        {
            strong { (label) ": " }
            (value)
        }
    }
}

fn expense_verify_view(expense: &Expense) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();
    let verify_endpoint = format_endpoint(endpoints::EXPENSE_VERIFY_API, expense.id);
    let status = if expense.verified {
        "Verified"
    } else {
        "Unverified"
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md mx-auto bg-white rounded shadow dark:border dark:bg-gray-800 dark:border-gray-700 p-6 space-y-4"
            {
                h1 class="text-xl font-bold" { "Confirm Verification" }

                div class="space-y-2"
                {
                    (detail_row("Expense Date", &expense.expense_date))
                    (detail_row("Amount", &format_currency(expense.amount)))
                    (detail_row("Category", &expense.category))
                    (detail_row("Description", &expense.description))
                    (detail_row("Verified", status))
                }

                form
                    hx-post=(verify_endpoint)
                    hx-indicator="#indicator"
                    hx-disabled-elt="#confirm-button"
                    hx-target-error="#alert-container"
                {
                    button
                        type="submit" id="confirm-button" tabindex="0"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="inline htmx-indicator" id="indicator"
                        {
                            (loading_spinner())
                        }
                        "Confirm"
                    }
                }

                a
                    href=(endpoints::EXPENSES_VIEW) tabindex="0"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Cancel"
                }
            }
        }
    };

    base("Confirm Verification", &[], &content)
}

// ============================================================================
// TESTS
// ============================================================================
