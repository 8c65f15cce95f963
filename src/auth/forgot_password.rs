use axum::{response::IntoResponse, response::Response};
use maud::{Markup, html};

use crate::html::base;

fn forgot_password_template() -> Markup {
    let content = html! {
        // Template adapted from https://flowbite.com/blocks/marketing/register/
        div
            class="flex flex-col items-center justify-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            a
                href="#"
                class="flex items-center mb-6 text-2xl font-semibold"
            {
                img
                    src="/static/favicon-32x32.png"
                    alt="logo"
                    class="w-8 h-8 mr-2";
                "Front Desk"
            }
            div
                class="w-full bg-white rounded shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1
                        class="text-xl font-bold md:text-2xl"
                    {
                        "Forgot your password?"
                    }
                    p class="text-justify"
                    {
                        "To reset the front desk password, go to the directory where
                    this server is running from and run the program 'reset_password',
                    pointing it to your database file. You will be prompted for a new
                    password on the command line."
                    }
                }
            }
        }
    };

    base("Forgot Password", &[], &content)
}

/// Renders a page describing how the staff password can be reset.
pub async fn get_forgot_password_page() -> Response {
    forgot_password_template().into_response()
}

#[cfg(test)]
mod forgot_password_tests {
    use axum::http::StatusCode;
    use scraper::Selector;

    use crate::test_utils::{assert_valid_html, parse_html_document};

    use super::get_forgot_password_page;

    #[tokio::test]
    async fn render_forgot_password_page() {
        let response = get_forgot_password_page().await;
        assert_eq!(response.status(), StatusCode::OK);

        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let h1_selector = Selector::parse("h1").unwrap();
        let heading = document
            .select(&h1_selector)
            .next()
            .expect("expected an h1 element")
            .text()
            .collect::<String>();
        assert!(heading.to_lowercase().contains("forgot your password"));
    }
}
