//! Reply keyboard offering one-tap shortcuts for the argument-less commands.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

/// Shortcut button labels, one per keyboard row.
///
/// Pressing a button sends its label as a message, so each label is a
/// command the dispatcher already understands.
pub const SHORTCUTS: [&str; 5] = [
    "/transcoder_healthcheck",
    "/transcoder_job",
    "/transcoder_job_status",
    "/transcoder_status",
    "/api_tenants",
];

/// Build the shortcut keyboard attached to help replies.
pub fn shortcut_keyboard() -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = SHORTCUTS
        .iter()
        .map(|label| vec![KeyboardButton::new(*label)])
        .collect();
    KeyboardMarkup::new(rows)
}
