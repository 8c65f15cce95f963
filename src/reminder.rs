//! Builds WhatsApp links for nudging members whose membership has lapsed.

use serde::Serialize;

#[derive(Serialize)]
struct ReminderQuery<'a> {
    text: &'a str,
}

/// Create a `wa.me` link that opens a WhatsApp chat with `phone` and a
/// pre-filled fee reminder addressed to `name`.
pub fn whatsapp_reminder_url(phone: &str, name: &str) -> String {
    let message = format!(
        "Hello {name},\n\nThank you for being a member! This is a gentle \
         reminder to settle your fee dues. We would appreciate it if you \
         could make the payment as soon as possible. Thank you!"
    );

    let query = serde_urlencoded::to_string(ReminderQuery { text: &message })
        .unwrap_or_else(|_| String::new());

    format!("https://wa.me/{phone}?{query}")
}
