//! Defines the API endpoint that marks a booking as verified.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{AppState, Error, database_id::BookingId, endpoints};

use super::core::verify_booking;

/// The state needed for the booking verification endpoint.
#[derive(Debug, Clone)]
pub struct BookingVerifyState {
    /// The database connection for updating bookings.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BookingVerifyState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Mark a booking as verified and send the client back to the bookings page.
///
/// On failure an alert is rendered into `#alert-container` and the booking is
/// left untouched.
pub async fn verify_booking_endpoint(
    State(state): State<BookingVerifyState>,
    Path(booking_id): Path<BookingId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match verify_booking(booking_id, &connection) {
        Ok(()) => (
            HxRedirect(endpoints::BOOKINGS_VIEW.to_owned()),
            StatusCode::OK,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not verify booking {booking_id}: {error}");
            error.into_alert_response()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod verify_booking_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;

    use crate::{
        booking::core::{get_booking, insert_booking, sample_booking},
        db::initialize,
        endpoints,
    };

    use super::{BookingVerifyState, verify_booking_endpoint};

    fn get_test_state() -> BookingVerifyState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        BookingVerifyState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn verify_updates_booking_and_redirects() {
        let state = get_test_state();
        let booking_id = {
            let connection = state.db_connection.lock().unwrap();
            insert_booking(&sample_booking(1), &connection).id
        };
        let db_connection = state.db_connection.clone();

        let response = verify_booking_endpoint(State(state), Path(booking_id)).await;

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::BOOKINGS_VIEW
        );
        let booking = get_booking(booking_id, &db_connection.lock().unwrap()).unwrap();
        assert!(booking.verified, "want booking to be verified");
    }

    #[tokio::test]
    async fn verify_missing_booking_returns_alert() {
        let state = get_test_state();

        let response = verify_booking_endpoint(State(state), Path(999)).await;

        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
        assert!(
            response.headers().get(HX_REDIRECT).is_none(),
            "failures must not redirect"
        );
    }

    #[tokio::test]
    async fn verify_twice_returns_alert_and_keeps_state() {
        let state = get_test_state();
        let booking_id = {
            let connection = state.db_connection.lock().unwrap();
            let mut booking = sample_booking(1);
            booking.verified = true;
            insert_booking(&booking, &connection).id
        };

        let response = verify_booking_endpoint(State(state), Path(booking_id)).await;

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
