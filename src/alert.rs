//! Dismissible alert messages swapped into the page's alert container by HTMX.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert message to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error alert with a summary and an explanation of what went wrong.
    Error {
        /// A short summary of the error.
        message: String,
        /// A longer explanation, including what the user can do about it.
        details: String,
    },
}

impl Alert {
    /// Render the alert as HTML for swapping into the alert container.
    pub fn into_html(self) -> Markup {
        let Alert::Error { message, details } = self;
        let container_style = "flex items-start p-4 mb-4 text-red-800 rounded-lg bg-red-50 \
            dark:bg-gray-800 dark:text-red-400 border border-red-300 \
            dark:border-red-800 shadow-lg";
        let close_button_style = "ms-auto -mx-1.5 -my-1.5 bg-red-50 text-red-500 rounded-lg \
            focus:ring-2 focus:ring-red-400 p-1.5 hover:bg-red-200 \
            inline-flex items-center justify-center h-8 w-8 dark:bg-gray-800 \
            dark:text-red-400 dark:hover:bg-gray-700";

        html! {
            div
                class=(container_style)
                role="alert"
            {
                div
                {
                    p class="text-sm font-medium" { (message) }
                    p class="mt-1 text-sm" { (details) }
                }

                button
                    type="button"
                    class=(close_button_style)
                    aria-label="Close"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    span class="sr-only" { "Close" }
                    svg class="w-3 h-3" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 14 14"
                    {
                        path
                            stroke="currentColor"
                            stroke-linecap="round"
                            stroke-linejoin="round"
                            stroke-width="2"
                            d="m1 1 6 6m0 0 6 6M7 7l6-6M7 7l-6 6" {}
                    }
                }
            }

            // The alert container is hidden while it has no content.
            script
            {
                "document.getElementById('alert-container').classList.remove('hidden');"
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
