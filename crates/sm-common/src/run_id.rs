//! ULID identifiers for correlating log lines.
//!
//! The process gets one id at first access; every match batch gets a fresh
//! one so its log lines and its response can be tied together.

use once_cell::sync::Lazy;
use ulid::Ulid;

static PROCESS_RUN_ID: Lazy<String> = Lazy::new(|| Ulid::new().to_string());

/// Process-level id, stable for the lifetime of the process.
#[inline]
pub fn process() -> &'static str {
    &PROCESS_RUN_ID
}

/// Fresh, time-ordered id (26 chars, URL-safe).
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}
