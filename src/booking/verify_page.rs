//! Defines the route handler for the booking verification confirm page.
//!
//! Verification is a two-step flow: the bookings table links here, and this
//! page shows the booking's details with Confirm/Cancel. Cancel is a plain
//! link back with no side effect.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::BookingId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, PAGE_CONTAINER_STYLE, base, format_currency,
        loading_spinner,
    },
    navigation::NavBar,
    student::get_all_students,
};

use super::{
    core::get_booking,
    join::{BookingRow, join_bookings_with_students, students_by_id},
};

/// The state needed for the booking verification confirm page.
#[derive(Debug, Clone)]
pub struct BookingVerifyViewState {
    /// The database connection for reading bookings and students.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BookingVerifyViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the confirmation page for verifying a booking.
pub async fn get_booking_verify_page(
    State(state): State<BookingVerifyViewState>,
    Path(booking_id): Path<BookingId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let booking = get_booking(booking_id, &connection)
        .inspect_err(|error| tracing::error!("could not get booking {booking_id}: {error}"))?;
    let students = get_all_students(&connection)
        .inspect_err(|error| tracing::error!("could not get students: {error}"))?;

    let rows = join_bookings_with_students(&[booking], &students_by_id(students));
    let row = rows.into_iter().next().ok_or(Error::NotFound)?;

    Ok(booking_verify_view(&row).into_response())
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

fn booking_verify_view(row: &BookingRow) -> Markup {
    let booking = &row.booking;
    let nav_bar = NavBar::new(endpoints::BOOKINGS_VIEW).into_html();
    let verify_endpoint = format_endpoint(endpoints::BOOKING_VERIFY_API, booking.id);
    let account_name = booking.student_account_name.as_deref().unwrap_or("N/A");

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md mx-auto bg-white rounded shadow dark:border dark:bg-gray-800 dark:border-gray-700 p-6 space-y-4"
            {
                h1 class="text-xl font-bold" { "Confirm Verification" }

                div class="space-y-2"
                {
                    (detail_row("Booking Date", &booking.booking_date))
                    (detail_row("Amount", &format_currency(booking.amount)))
                    (detail_row("Cash", &format_currency(booking.cash)))
                    (detail_row("Online", &format_currency(booking.online)))
                    (detail_row("Student Name", &row.student_name))
                    (detail_row("Valid Upto", &row.valid_upto))
                    (detail_row("Shift", &row.shift_name))
                    (detail_row("Student Account Name", account_name))
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
                    href=(endpoints::BOOKINGS_VIEW) tabindex="0"
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
