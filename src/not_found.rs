//! Defines the 404 not found page and its route handler.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The page shown when the requested resource does not exist.
pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            error_view(
                "Not Found",
                "404",
                "Sorry, the page you were looking for does not exist.",
                "Check that the URL is correct, or head back to the dashboard.",
            ),
        )
            .into_response()
    }
}

/// Route handler for unmatched routes.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
