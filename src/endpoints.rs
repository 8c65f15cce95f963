//! The endpoints for the server.
//! These endpoints act as the glue between the HTML in responses (e.g., forms, links)
//! and the route handlers.

/// The root endpoint, redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the monthly summary.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page listing bookings.
pub const BOOKINGS_VIEW: &str = "/bookings";
/// The confirmation page for verifying a booking.
pub const BOOKING_VERIFY_VIEW: &str = "/bookings/{booking_id}/verify";
/// The API endpoint for marking a booking as verified.
pub const BOOKING_VERIFY_API: &str = "/api/bookings/{booking_id}/verify";
/// The page listing students.
pub const STUDENTS_VIEW: &str = "/students";
/// The page listing students whose membership has expired.
pub const EXPIRED_MEMBERS_VIEW: &str = "/expired-members";
/// The page listing expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The confirmation page for verifying an expense.
pub const EXPENSE_VERIFY_VIEW: &str = "/expenses/{expense_id}/verify";
/// The API endpoint for marking an expense as verified.
pub const EXPENSE_VERIFY_API: &str = "/api/expenses/{expense_id}/verify";
/// The login page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The API endpoint for logging in.
pub const LOG_IN_API: &str = "/api/log_in";
/// The API endpoint for logging out.
pub const LOG_OUT: &str = "/api/log_out";
/// The registration page, available until a staff password exists.
pub const REGISTER_VIEW: &str = "/register";
/// The API endpoint for creating the staff user.
pub const USERS_API: &str = "/api/users";
/// The page shown when the user forgets their password.
pub const FORGOT_PASSWORD_VIEW: &str = "/forgot_password";
/// The internal server error page.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route serving static files such as the bundled charting library.
pub const STATIC_FILES: &str = "/static";

/// Replace the path parameter in `endpoint` with `id`.
///
/// For example, `format_endpoint("/bookings/{booking_id}/verify", 42)` produces
/// `/bookings/42/verify`.
pub fn format_endpoint(endpoint: &str, id: i64) -> String {
    let start = endpoint
        .find('{')
        .unwrap_or_else(|| panic!("endpoint {endpoint} does not contain a path parameter"));
    let end = endpoint
        .find('}')
        .unwrap_or_else(|| panic!("endpoint {endpoint} does not contain a path parameter"));

    format!("{}{}{}", &endpoint[..start], id, &endpoint[end + 1..])
}
