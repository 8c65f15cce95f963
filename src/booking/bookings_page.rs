//! Defines the route handler for the page that lists bookings as a table.
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
    student::get_all_students,
    timezone::current_local_date,
};

use super::{
    core::get_all_bookings,
    filter::BookingFilter,
    join::{BookingRow, join_bookings_with_students, students_by_id},
};

/// The state needed for the bookings page.
#[derive(Debug, Clone)]
pub struct BookingsViewState {
    /// The database connection for reading bookings and students.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for BookingsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters accepted by the bookings page.
#[derive(Debug, Default, Deserialize)]
pub struct BookingsQuery {
    /// The filter mode to apply, defaults to showing everything.
    #[serde(default)]
    pub filter: BookingFilter,
}

/// Render the list of bookings, each enriched with the paying student's
/// details.
pub async fn get_bookings_page(
    State(state): State<BookingsViewState>,
    Query(query): Query<BookingsQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let bookings = get_all_bookings(&connection)
        .inspect_err(|error| tracing::error!("could not get bookings: {error}"))?;
    let students = get_all_students(&connection)
        .inspect_err(|error| tracing::error!("could not get students: {error}"))?;

    let bookings = query.filter.apply(bookings, today);
    let rows = join_bookings_with_students(&bookings, &students_by_id(students));

    Ok(bookings_view(&rows, query.filter).into_response())
}

fn filter_bar(active_filter: BookingFilter) -> Markup {
    html! {
        nav class="flex flex-wrap gap-2 mb-4"
        {
            @for filter in [
                BookingFilter::All,
                BookingFilter::ThisMonth,
                BookingFilter::UnverifiedThisMonth,
            ] {
                a
                    href={ (endpoints::BOOKINGS_VIEW) "?filter=" (filter.as_query_value()) }
                    class=(if filter == active_filter { FILTER_PILL_ACTIVE_STYLE } else { FILTER_PILL_STYLE })
                {
                    (filter.label())
                }
            }
        }
    }
}

fn verified_badge(verified: bool) -> Markup {
    html! {
        @if verified {
            span class=(BADGE_VERIFIED_STYLE) { "Verified" }
        } @else {
            span class=(BADGE_UNVERIFIED_STYLE) { "Unverified" }
        }
    }
}

fn booking_row(index: usize, row: &BookingRow) -> Markup {
    let booking = &row.booking;
    let verify_url = format_endpoint(endpoints::BOOKING_VERIFY_VIEW, booking.id);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (index + 1) }
            td class=(TABLE_CELL_STYLE) { (booking.booking_date) }
            td class=(TABLE_CELL_STYLE) { (format_currency(booking.amount)) }
            td class=(TABLE_CELL_STYLE) { (format_currency(booking.cash)) }
            td class=(TABLE_CELL_STYLE) { (format_currency(booking.online)) }
            td class=(TABLE_CELL_STYLE) { (row.student_name) }
            td class=(TABLE_CELL_STYLE) { (row.valid_upto) }
            td class=(TABLE_CELL_STYLE) { (row.shift_name) }
            td class=(TABLE_CELL_STYLE) { (verified_badge(booking.verified)) }
            td class=(TABLE_CELL_STYLE) { (booking.student_account_name.as_deref().unwrap_or("")) }
            td class=(TABLE_CELL_STYLE)
            {
                @if !booking.verified {
                    a href=(verify_url) class=(LINK_STYLE) { "Verify" }
                }
            }
        }
    }
}

fn bookings_view(rows: &[BookingRow], active_filter: BookingFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::BOOKINGS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                h1 class="text-xl font-bold" { "Bookings" }

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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Cash" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Online" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Student Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Valid Upto" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Shift" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Verified" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Student Account Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Action" }
                            }
                        }

                        tbody
                        {
                            @for (index, row) in rows.iter().enumerate() {
                                (booking_row(index, row))
                            }

                            @if rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="11"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No bookings match this filter."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Bookings", &[], &content)
}

// ============================================================================
// TESTS
// ============================================================================
