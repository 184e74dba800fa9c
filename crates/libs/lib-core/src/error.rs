//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across the chain, wallet, and payment crates. It follows the `thiserror` pattern
//! for ergonomic error handling.
//!
//! ## Design Philosophy
//!
//! - **Single Error Type**: All crates use `AppError` for consistency
//! - **Descriptive Messages**: Each variant includes a context string
//! - **Display Safety**: `user_message()` always yields a complete sentence
//! - **Type Safety**: Compiler ensures all errors are handled
//!
//! ## Error Categories
//!
//! 1. **Recoverable environment errors** - The user can fix these and retry
//!    - [`NoExtension`](AppError::NoExtension) - install/enable the wallet extension
//!    - [`NoAccount`](AppError::NoAccount) - authorize or select an account
//!    - [`Connection`](AppError::Connection) - RPC endpoint unreachable, retry later
//!
//! 2. **Per-attempt terminal errors** - A fresh attempt is required
//!    - [`Dispatch`](AppError::Dispatch) - the chain rejected the transaction
//!    - [`Validation`](AppError::Validation) - malformed amount or recipient,
//!      caught locally before any network call
//!
//! 3. **Infrastructure errors**
//!    - [`Config`](AppError::Config), [`Rpc`](AppError::Rpc),
//!      [`Internal`](AppError::Internal)
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_recipient(addr: &str) -> Result<String> {
//!     if addr.trim().is_empty() {
//!         return Err(AppError::Validation(
//!             "Recipient address cannot be empty.".to_string(),
//!         ));
//!     }
//!     Ok(addr.to_string())
//! }
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all payment-flow error scenarios.
///
/// Each variant includes a descriptive `String` for context. The `#[error]` attribute
/// from `thiserror` provides automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No compatible wallet extension detected in the execution environment.
    ///
    /// Recoverable: the user must install or enable the extension.
    #[error("No wallet extension found: {0}")]
    NoExtension(String),

    /// Wallet present but no account is authorized or selected.
    ///
    /// Recoverable: re-run discovery or pick a different account.
    #[error("No account available: {0}")]
    NoAccount(String),

    /// RPC endpoint unreachable, handshake rejected, or session dropped.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Chain RPC returned an error response or malformed payload.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The chain itself rejected the transaction (e.g. insufficient balance).
    ///
    /// Terminal for the attempt; the chain's error representation is carried verbatim.
    #[error("Transaction dispatch error: {0}")]
    Dispatch(String),

    /// Invalid user input (malformed amount, empty recipient), caught before
    /// any network round-trip.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Internal error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get a user-friendly error message suitable for direct display.
    ///
    /// Always a complete sentence; internal errors return a generic message
    /// to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NoExtension(_) => {
                "No wallet extension found. Please install or enable a compatible wallet extension.".to_string()
            }
            AppError::NoAccount(_) => "No account selected.".to_string(),
            AppError::Connection(_) => {
                "Not connected to the network. Please refresh the page and try again.".to_string()
            }
            AppError::Dispatch(msg) => format!("Transaction failed: {}", msg),
            AppError::Validation(msg) => msg.clone(),
            AppError::Config(_) | AppError::Rpc(_) | AppError::Internal(_) => {
                "An internal error occurred. Please try again.".to_string()
            }
        }
    }

    /// Whether a fresh attempt may succeed without the user changing anything
    /// other than retrying (connection hiccups) or fixing their environment.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::NoExtension(_)
                | AppError::NoAccount(_)
                | AppError::Connection(_)
                | AppError::Validation(_)
        )
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Rpc(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_sentences() {
        let errors = [
            AppError::NoExtension("none injected".into()),
            AppError::NoAccount("empty set".into()),
            AppError::Connection("refused".into()),
            AppError::Dispatch("Module(x)".into()),
            AppError::Validation("Amount must be a positive number.".into()),
            AppError::Internal("oops".into()),
        ];
        for err in errors {
            let msg = err.user_message();
            assert!(!msg.is_empty());
            assert!(msg.ends_with('.') || msg.ends_with(')'), "not a sentence: {msg}");
        }
    }

    #[test]
    fn test_dispatch_message_carries_chain_error() {
        let err = AppError::Dispatch("Module(x)".into());
        assert!(err.user_message().contains("Module(x)"));
    }

    #[test]
    fn test_recoverability() {
        assert!(AppError::NoExtension("".into()).is_recoverable());
        assert!(AppError::Connection("".into()).is_recoverable());
        assert!(!AppError::Dispatch("".into()).is_recoverable());
        assert!(!AppError::Internal("".into()).is_recoverable());
    }
}
