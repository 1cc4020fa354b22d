use std::time::{SystemTime, UNIX_EPOCH};

/// Get a timestamp in milliseconds since the UNIX epoch
pub fn timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
