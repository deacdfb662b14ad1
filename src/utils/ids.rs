//! Identifier and timestamp helpers

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Opaque session id, `session_<millis>_<9 random chars>`
pub fn session_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", now_millis(), &random[..9])
}

/// Message id, `msg_<millis>_<origin>`
pub fn message_id(origin: &str) -> String {
    format!("msg_{}_{}", now_millis(), origin)
}

/// Image generation id, `img_<millis>`
pub fn image_id() -> String {
    format!("img_{}", now_millis())
}

/// Current UTC time with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
