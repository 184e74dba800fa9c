//! # Transaction State
//!
//! The single per-attempt state exposed to callers. Mutated exclusively by
//! the reducer; destroyed by an explicit reset or by starting a new attempt.

use serde::{Deserialize, Serialize};

/// Discrete lifecycle status of a payment attempt.
///
/// `idle → preparing → pending → {success | error}`; the terminal states
/// only leave via an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Idle,
    Preparing,
    Pending,
    Success,
    Error,
}

/// UI-consumable transaction state.
///
/// `hash` and `block_hash` are set-once per attempt and cleared only by a
/// reset to idle; `timestamp` (epoch milliseconds) is set only on terminal
/// success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionState {
    pub status: TransactionStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(rename = "blockHash", skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl TransactionState {
    /// The initial state of every attempt.
    pub fn idle() -> Self {
        Self {
            status: TransactionStatus::Idle,
            message: String::new(),
            hash: None,
            block_hash: None,
            timestamp: None,
        }
    }

    /// Whether the attempt has resolved (successfully or not).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Success | TransactionStatus::Error
        )
    }
}

impl Default for TransactionState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_shape() {
        let state = TransactionState::idle();
        assert_eq!(state.status, TransactionStatus::Idle);
        assert!(state.message.is_empty());
        assert!(state.hash.is_none());
        assert!(state.block_hash.is_none());
        assert!(state.timestamp.is_none());
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let json = serde_json::to_string(&TransactionState::idle()).unwrap();
        assert_eq!(json, r#"{"status":"idle","message":""}"#);
    }
}
