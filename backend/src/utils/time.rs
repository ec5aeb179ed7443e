use chrono::{DateTime, Utc};
use chrono_tz::Tz;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a UTC instant in the configured timezone for user-facing messages.
pub fn format_local(at: DateTime<Utc>, tz: &Tz) -> String {
    at.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}
