//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, input validation,
//! and display formatting of chain hashes and addresses.

pub mod envs;
pub mod format;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_opt, get_env_parse};
pub use format::{format_hash, truncate_hash};
pub use time::now_epoch_millis;
pub use validation::validate_not_empty;
