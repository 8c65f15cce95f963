//! Defines the API endpoint that marks an expense as verified.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{AppState, Error, database_id::ExpenseId, endpoints};

use super::core::verify_expense;

/// The state needed for the expense verification endpoint.
#[derive(Debug, Clone)]
pub struct ExpenseVerifyState {
    /// The database connection for updating expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseVerifyState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Mark an expense as verified and send the client back to the expenses page.
///
/// On failure an alert is rendered into `#alert-container` and the expense is
/// left untouched.
pub async fn verify_expense_endpoint(
    State(state): State<ExpenseVerifyState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match verify_expense(expense_id, &connection) {
        Ok(()) => (
            HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
            StatusCode::OK,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not verify expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod verify_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        endpoints,
        expense::core::{get_expense, insert_expense, sample_expense},
    };

    use super::{ExpenseVerifyState, verify_expense_endpoint};

    fn get_test_state() -> ExpenseVerifyState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        ExpenseVerifyState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn verify_updates_expense_and_redirects() {
        let state = get_test_state();
        let expense_id = {
            let connection = state.db_connection.lock().unwrap();
            insert_expense(&sample_expense("Electricity"), &connection).id
        };
        let db_connection = state.db_connection.clone();

        let response = verify_expense_endpoint(State(state), Path(expense_id)).await;

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::EXPENSES_VIEW
        );
        let expense = get_expense(expense_id, &db_connection.lock().unwrap()).unwrap();
        assert!(expense.verified, "want expense to be verified");
    }

    #[tokio::test]
    async fn verify_missing_expense_returns_alert() {
        let state = get_test_state();

        let response = verify_expense_endpoint(State(state), Path(999)).await;

        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
        assert!(
            response.headers().get(HX_REDIRECT).is_none(),
            "failures must not redirect"
        );
    }

    #[tokio::test]
    async fn verify_twice_returns_alert() {
        let state = get_test_state();
        let expense_id = {
            let connection = state.db_connection.lock().unwrap();
            let mut expense = sample_expense("Electricity");
            expense.verified = true;
            insert_expense(&expense, &connection).id
        };

        let response = verify_expense_endpoint(State(state), Path(expense_id)).await;

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
