//! Defines the route handler for the page that lists students as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{
        FILTER_PILL_ACTIVE_STYLE, FILTER_PILL_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, base,
    },
    navigation::NavBar,
    timezone::current_local_date,
};

use super::{
    core::{get_all_students, sort_students_by_receipt},
    filter::StudentFilter,
    Student,
};

/// The state needed for the students page.
#[derive(Debug, Clone)]
pub struct StudentsViewState {
    /// The database connection for reading students.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for StudentsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters accepted by the students page.
#[derive(Debug, Default, Deserialize)]
pub struct StudentsQuery {
    /// The filter mode to apply, defaults to showing everyone.
    #[serde(default)]
    pub filter: StudentFilter,
}

/// Render the list of students, most recent receipt first.
pub async fn get_students_page(
    State(state): State<StudentsViewState>,
    Query(query): Query<StudentsQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let mut students = get_all_students(&connection)
        .inspect_err(|error| tracing::error!("could not get students: {error}"))?;
    sort_students_by_receipt(&mut students);
    let students = query.filter.apply(students, today);

    Ok(students_view(&students, query.filter).into_response())
}

fn filter_bar(active_filter: StudentFilter) -> Markup {
    html! {
        nav class="flex flex-wrap gap-2 mb-4"
        {
            @for filter in [
                StudentFilter::All,
                StudentFilter::RegisteredThisMonth,
                StudentFilter::DroppedThisMonth,
                StudentFilter::AllDropped,
            ] {
                a
                    href={ (endpoints::STUDENTS_VIEW) "?filter=" (filter.as_query_value()) }
                    class=(if filter == active_filter { FILTER_PILL_ACTIVE_STYLE } else { FILTER_PILL_STYLE })
                {
                    (filter.label())
                }
            }
        }
    }
}

fn student_row(index: usize, student: &Student) -> Markup {
    let row_style = if student.active {
        "bg-white border-b dark:bg-gray-800 dark:border-gray-700 \
         text-green-700 dark:text-green-300"
    } else {
        "bg-white border-b dark:bg-gray-800 dark:border-gray-700 \
         text-red-700 dark:text-red-300"
    };
    let receipt_number = student
        .receipt_number
        .map(|number| number.to_string())
        .unwrap_or_else(|| "N/A".to_owned());

    html! {
        tr class=(row_style)
        {
            td class=(TABLE_CELL_STYLE) { (index + 1) }
            td class=(TABLE_CELL_STYLE) { (receipt_number) }
            td class=(TABLE_CELL_STYLE) { (student.name) }
            td class=(TABLE_CELL_STYLE) { (student.phone) }
            td class=(TABLE_CELL_STYLE) { (student.address) }
            td class=(TABLE_CELL_STYLE) { (student.shift_name) }
            td class=(TABLE_CELL_STYLE) { (student.shift_start) }
            td class=(TABLE_CELL_STYLE) { (student.shift_end) }
            td class=(TABLE_CELL_STYLE) { (student.valid_upto) }
            td class=(TABLE_CELL_STYLE) {
                @if student.active { "Active" } @else { "Inactive" }
            }
        }
    }
}

fn students_view(students: &[Student], active_filter: StudentFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::STUDENTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                h1 class="text-xl font-bold" { "Students" }

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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Receipt No." }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Phone" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Address" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Shift" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Shift Start" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Shift End" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Valid Upto" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                            }
                        }

                        tbody
                        {
                            @for (index, student) in students.iter().enumerate() {
                                (student_row(index, student))
                            }

                            @if students.is_empty() {
                                tr
                                {
                                    td
                                        colspan="10"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No students match this filter."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Students", &[], &content)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod students_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        db::initialize,
        student::core::{insert_student, sample_student},
        student::filter::StudentFilter,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{StudentsQuery, StudentsViewState, get_students_page};

    fn get_test_state() -> StudentsViewState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        StudentsViewState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn row_names(document: &scraper::Html) -> Vec<String> {
        let cell_selector = Selector::parse("tbody tr td:nth-child(3)").unwrap();
        document
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn lists_students_in_receipt_order() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let mut low = sample_student("Low Receipt");
            low.receipt_number = Some(10);
            insert_student(&low, &connection);
            let mut high = sample_student("High Receipt");
            high.receipt_number = Some(90);
            insert_student(&high, &connection);
            let mut none = sample_student("No Receipt");
            none.receipt_number = None;
            insert_student(&none, &connection);
        }

        let response = get_students_page(State(state), Query(StudentsQuery::default()))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(
            row_names(&document),
            vec!["High Receipt", "Low Receipt", "No Receipt"]
        );
    }

    #[tokio::test]
    async fn dropped_filter_hides_active_students() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            insert_student(&sample_student("Active Member"), &connection);
            let mut dropped = sample_student("Dropped Member");
            dropped.active = false;
            insert_student(&dropped, &connection);
        }

        let response = get_students_page(
            State(state),
            Query(StudentsQuery {
                filter: StudentFilter::AllDropped,
            }),
        )
        .await
        .unwrap();

        let document = parse_html_document(response).await;
        assert_eq!(row_names(&document), vec!["Dropped Member"]);
    }

    #[tokio::test]
    async fn empty_table_shows_empty_state() {
        let state = get_test_state();

        let response = get_students_page(State(state), Query(StudentsQuery::default()))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        let empty_selector = Selector::parse("td[data-empty-state]").unwrap();
        assert!(
            document.select(&empty_selector).next().is_some(),
            "want an empty state row"
        );
    }

    #[tokio::test]
    async fn missing_receipt_renders_as_not_available() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let mut none = sample_student("No Receipt");
            none.receipt_number = None;
            insert_student(&none, &connection);
        }

        let response = get_students_page(State(state), Query(StudentsQuery::default()))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        let cell_selector = Selector::parse("tbody tr td:nth-child(2)").unwrap();
        let receipt_cell = document
            .select(&cell_selector)
            .next()
            .expect("expected a receipt cell")
            .text()
            .collect::<String>();
        assert_eq!(receipt_cell.trim(), "N/A");
    }
}
