//! # Time Utilities
//!
//! Utilities for timestamps using chrono.

use chrono::Utc;

/// Current Unix timestamp in milliseconds.
///
/// Used for the terminal-success timestamp on transaction state.
pub fn now_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}
