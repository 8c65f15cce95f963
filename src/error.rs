//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid password.
    #[error("invalid password")]
    InvalidCredentials,

    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A staff password has already been registered.
    ///
    /// The application supports a single staff credential, so registration is
    /// only available on first run.
    #[error("a staff password has already been registered")]
    UserAlreadyExists,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to verify a booking that does not exist
    #[error("tried to verify a booking that is not in the database")]
    VerifyMissingBooking,

    /// Tried to verify a booking that has already been verified
    #[error("the booking has already been verified")]
    BookingAlreadyVerified,

    /// Tried to verify an expense that does not exist
    #[error("tried to verify an expense that is not in the database")]
    VerifyMissingExpense,

    /// Tried to verify an expense that has already been verified
    #[error("the expense has already been verified")]
    ExpenseAlreadyVerified,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::VerifyMissingBooking => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not verify booking".to_owned(),
                    details: "The booking could not be found. \
                    Try refreshing the page to see if the booking has been removed."
                        .to_owned(),
                },
            ),
            Error::BookingAlreadyVerified => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Booking already verified".to_owned(),
                    details: "The booking has already been verified, possibly from another \
                    session. Refresh the page to see the current state."
                        .to_owned(),
                },
            ),
            Error::VerifyMissingExpense => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not verify expense".to_owned(),
                    details: "The expense could not be found. \
                    Try refreshing the page to see if the expense has been removed."
                        .to_owned(),
                },
            ),
            Error::ExpenseAlreadyVerified => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Expense already verified".to_owned(),
                    details: "The expense has already been verified, possibly from another \
                    session. Refresh the page to see the current state."
                        .to_owned(),
                },
            ),
            Error::UserAlreadyExists => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Registration unavailable".to_owned(),
                    details: "A staff password has already been registered. \
                    Log in with the existing password instead."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
