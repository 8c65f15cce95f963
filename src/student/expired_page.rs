//! Defines the route handler for the page that lists expired memberships.
//!
//! Each row carries a WhatsApp link with a pre-filled fee reminder so staff
//! can nudge a member in one click.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    dates::{is_past, parse_display_date},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base,
    },
    navigation::NavBar,
    reminder::whatsapp_reminder_url,
    timezone::current_local_date,
};

use super::{Student, core::get_all_students};

/// The state needed for the expired members page.
#[derive(Debug, Clone)]
pub struct ExpiredMembersViewState {
    /// The database connection for reading students.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpiredMembersViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the students whose membership lapsed before today.
///
/// A membership counts as expired only if `valid_upto` parses as a date and
/// that date is strictly before today; unparseable dates are never flagged.
pub async fn get_expired_members_page(
    State(state): State<ExpiredMembersViewState>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let students = get_all_students(&connection)
        .inspect_err(|error| tracing::error!("could not get students: {error}"))?;
    let expired: Vec<Student> = students
        .into_iter()
        .filter(|student| is_past(parse_display_date(&student.valid_upto), today))
        .collect();

    Ok(expired_members_view(&expired).into_response())
}

fn expired_member_row(index: usize, student: &Student) -> Markup {
    let receipt_number = student
        .receipt_number
        .map(|number| number.to_string())
        .unwrap_or_else(|| "N/A".to_owned());
    let reminder_url = whatsapp_reminder_url(&student.phone, &student.name);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (index + 1) }
            td class=(TABLE_CELL_STYLE) { (receipt_number) }
            td class=(TABLE_CELL_STYLE) { (student.name) }
            td class=(TABLE_CELL_STYLE) { (student.phone) }
            td class=(TABLE_CELL_STYLE) { (student.valid_upto) }
            td class=(TABLE_CELL_STYLE)
            {
                a
                    href=(reminder_url)
                    target="_blank"
                    rel="noopener"
                    class=(LINK_STYLE)
                {
                    "Send Reminder via WhatsApp"
                }
            }
        }
    }
}

fn expired_members_view(expired: &[Student]) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPIRED_MEMBERS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                h1 class="text-xl font-bold" { "Expired Members" }

                @if expired.is_empty() {
                    p data-empty-state="true" class="text-gray-500 dark:text-gray-400"
                    {
                        "No expired members."
                    }
                } @else {
                    div class="relative overflow-x-auto rounded"
                    {
                        table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Serial No." }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Receipt No." }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Phone" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Valid Upto" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Action" }
                                }
                            }

                            tbody
                            {
                                @for (index, student) in expired.iter().enumerate() {
                                    (expired_member_row(index, student))
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Expired Members", &[], &content)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod expired_members_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::{Duration, OffsetDateTime};

    use crate::{
        dates::format_display_date,
        db::initialize,
        student::core::{insert_student, sample_student},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{ExpiredMembersViewState, get_expired_members_page};

    fn get_test_state() -> ExpiredMembersViewState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        ExpiredMembersViewState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn lists_only_expired_members() {
        let state = get_test_state();
        let today = OffsetDateTime::now_utc().date();
        {
            let connection = state.db_connection.lock().unwrap();
            let mut expired = sample_student("Expired Member");
            expired.valid_upto = format_display_date(today - Duration::days(10));
            insert_student(&expired, &connection);
            let mut current = sample_student("Current Member");
            current.valid_upto = format_display_date(today + Duration::days(10));
            insert_student(&current, &connection);
            let mut garbage_date = sample_student("Garbage Date");
            garbage_date.valid_upto = "soon".to_owned();
            insert_student(&garbage_date, &connection);
        }

        let response = get_expired_members_page(State(state)).await.unwrap();

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let cell_selector = Selector::parse("tbody tr td:nth-child(3)").unwrap();
        let names: Vec<String> = document
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(names, vec!["Expired Member"]);
    }

    #[tokio::test]
    async fn expiring_today_is_not_expired() {
        let state = get_test_state();
        let today = OffsetDateTime::now_utc().date();
        {
            let connection = state.db_connection.lock().unwrap();
            let mut expires_today = sample_student("Expires Today");
            expires_today.valid_upto = format_display_date(today);
            insert_student(&expires_today, &connection);
        }

        let response = get_expired_members_page(State(state)).await.unwrap();

        let document = parse_html_document(response).await;
        let empty_selector = Selector::parse("[data-empty-state]").unwrap();
        assert!(
            document.select(&empty_selector).next().is_some(),
            "want the empty state when nobody has lapsed"
        );
    }

    #[tokio::test]
    async fn reminder_link_targets_member_phone() {
        let state = get_test_state();
        let today = OffsetDateTime::now_utc().date();
        {
            let connection = state.db_connection.lock().unwrap();
            let mut expired = sample_student("Expired Member");
            expired.phone = "919999888877".to_owned();
            expired.valid_upto = format_display_date(today - Duration::days(1));
            insert_student(&expired, &connection);
        }

        let response = get_expired_members_page(State(state)).await.unwrap();

        let document = parse_html_document(response).await;
        let link_selector = Selector::parse("tbody a[href^='https://wa.me/']").unwrap();
        let href = document
            .select(&link_selector)
            .next()
            .expect("expected a WhatsApp reminder link")
            .value()
            .attr("href")
            .unwrap();
        assert!(
            href.starts_with("https://wa.me/919999888877?text="),
            "got {href}"
        );
    }
}
