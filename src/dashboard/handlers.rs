//! Dashboard HTTP handlers and view rendering.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::{
    AppState, Error,
    booking::get_all_bookings,
    dashboard::{
        aggregation::{DashboardStats, build_dashboard_stats, shift_distribution},
        cards::stat_cards_view,
        charts::{DashboardChart, charts_script, charts_view, shift_distribution_chart},
    },
    endpoints,
    expense::get_all_expenses,
    html::{HeadElement, base},
    navigation::NavBar,
    student::get_all_students,
    timezone::current_local_date,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading students, bookings and expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the monthly overview: headline figures and the shift distribution chart.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let students = get_all_students(&connection)
        .inspect_err(|error| tracing::error!("could not get students: {error}"))?;
    let bookings = get_all_bookings(&connection)
        .inspect_err(|error| tracing::error!("could not get bookings: {error}"))?;
    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;

    let stats = build_dashboard_stats(&students, &bookings, &expenses, today);
    let distribution = shift_distribution(&students);

    let charts = [DashboardChart {
        id: "shift-distribution-chart",
        options: shift_distribution_chart(&distribution).to_string(),
    }];

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    Ok(dashboard_view(nav_bar, &stats, &charts).into_response())
}

fn dashboard_view(nav_bar: NavBar, stats: &DashboardStats, charts: &[DashboardChart]) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (stat_cards_view(stats))

            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod dashboard_route_tests {
    use axum::{extract::State, http::StatusCode};
    use scraper::Selector;
    use std::sync::{Arc, Mutex};
    use time::{Duration, OffsetDateTime};

    use rusqlite::Connection;

    use crate::{
        booking::core::{insert_booking, sample_booking},
        dates::format_display_date,
        db::initialize,
        student::core::{insert_student, sample_student},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{DashboardState, get_dashboard_page};

    fn get_test_state(connection: Connection) -> DashboardState {
        DashboardState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    #[tokio::test]
    async fn dashboard_page_renders_cards_and_chart() {
        let connection = get_test_connection();
        let today = OffsetDateTime::now_utc().date();

        let mut student = sample_student("Asha Verma");
        student.shift_name = "Morning".to_owned();
        let student = insert_student(&student, &connection);

        let mut booking = sample_booking(student.id);
        booking.booking_date = format_display_date(today);
        insert_booking(&booking, &connection);

        let response = get_dashboard_page(State(get_test_state(connection)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let chart_selector = Selector::parse("#shift-distribution-chart").unwrap();
        assert!(
            html.select(&chart_selector).next().is_some(),
            "shift distribution chart container not found"
        );

        let card_selector = Selector::parse("[data-stat='Active Students']").unwrap();
        let card_text = html
            .select(&card_selector)
            .next()
            .expect("active students card not found")
            .text()
            .collect::<String>();
        assert_eq!(card_text, "1");
    }

    #[tokio::test]
    async fn dashboard_page_renders_zeroes_without_data() {
        let connection = get_test_connection();

        let response = get_dashboard_page(State(get_test_state(connection)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let card_selector = Selector::parse("[data-stat='Collected This Month']").unwrap();
        let card_text = html
            .select(&card_selector)
            .next()
            .expect("collected this month card not found")
            .text()
            .collect::<String>();
        assert_eq!(card_text, "₹0");
    }

    #[tokio::test]
    async fn dashboard_counts_expired_memberships() {
        let connection = get_test_connection();
        let today = OffsetDateTime::now_utc().date();

        let mut expired = sample_student("Ravi Iyer");
        expired.valid_upto = format_display_date(today - Duration::days(10));
        insert_student(&expired, &connection);

        let mut current = sample_student("Meena Pillai");
        current.valid_upto = format_display_date(today + Duration::days(10));
        insert_student(&current, &connection);

        let response = get_dashboard_page(State(get_test_state(connection)))
            .await
            .unwrap();
        let html = parse_html_document(response).await;

        let card_selector = Selector::parse("[data-stat='Expired Memberships']").unwrap();
        let card_text = html
            .select(&card_selector)
            .next()
            .expect("expired memberships card not found")
            .text()
            .collect::<String>();
        assert_eq!(card_text, "1");
    }
}
