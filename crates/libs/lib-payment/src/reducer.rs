//! # Transaction State Reducer
//!
//! Pure mapping from payment events to the next [`TransactionState`]. The
//! reducer owns the state-machine invariants so they hold no matter what
//! order (or subset) of events the network delivers:
//!
//! - `hash` is set-once per attempt; only a reset clears it.
//! - `success` and `error` are absorbing; only `Reset` leaves them.
//! - every message is a complete sentence suitable for direct display.

use crate::state::{TransactionState, TransactionStatus};
use lib_utils::format::truncate_hash;
use lib_utils::time::now_epoch_millis;

/// Fixed message while the transfer intent is being built.
pub const MSG_PREPARING: &str = "Preparing your transaction...";

/// Fixed message while the extension prompt is open.
pub const MSG_AWAITING_SIGNATURE: &str =
    "Transaction pending. Please sign the transaction in your wallet extension.";

/// Fixed message on terminal success.
pub const MSG_SUCCESS: &str = "Transaction successful!";

/// One step of a payment attempt, as seen by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    /// Unit conversion done, intent being assembled
    Prepare,
    /// Signer acquired; waiting on the extension prompt and broadcast
    AwaitSignature,
    /// The network included the transaction in a (non-final) block
    Included { tx_hash: String, block_hash: String },
    /// The network finalized the transaction
    Finalized { tx_hash: String, block_hash: String },
    /// The chain executed and rejected the transaction
    DispatchFailed { error: String },
    /// A local or transport failure; `message` is display-ready
    Failed { message: String },
    /// Explicit user reset back to idle
    Reset,
}

/// Compute the next state. Pure: no I/O, no mutation of the input.
pub fn apply(state: &TransactionState, event: &PaymentEvent) -> TransactionState {
    if let PaymentEvent::Reset = event {
        return TransactionState::idle();
    }

    // Terminal states absorb everything except Reset; late network
    // callbacks after success/error must not mutate the outcome.
    if state.is_terminal() {
        return state.clone();
    }

    match event {
        PaymentEvent::Prepare => TransactionState {
            status: TransactionStatus::Preparing,
            message: MSG_PREPARING.to_string(),
            ..state.clone()
        },
        PaymentEvent::AwaitSignature => TransactionState {
            status: TransactionStatus::Pending,
            message: MSG_AWAITING_SIGNATURE.to_string(),
            ..state.clone()
        },
        PaymentEvent::Included { tx_hash, block_hash } => TransactionState {
            status: TransactionStatus::Pending,
            message: format!("Transaction included in block {}", truncate_hash(block_hash)),
            hash: state.hash.clone().or_else(|| Some(tx_hash.clone())),
            block_hash: Some(block_hash.clone()),
            timestamp: None,
        },
        PaymentEvent::Finalized { tx_hash, block_hash } => TransactionState {
            status: TransactionStatus::Success,
            message: MSG_SUCCESS.to_string(),
            hash: state.hash.clone().or_else(|| Some(tx_hash.clone())),
            // The finalizing block supersedes the including block.
            block_hash: Some(block_hash.clone()),
            timestamp: Some(now_epoch_millis()),
        },
        PaymentEvent::DispatchFailed { error } => TransactionState {
            status: TransactionStatus::Error,
            message: format!("Transaction failed: {}", error),
            ..state.clone()
        },
        PaymentEvent::Failed { message } => TransactionState {
            status: TransactionStatus::Error,
            message: message.clone(),
            ..state.clone()
        },
        PaymentEvent::Reset => TransactionState::idle(),
    }
}
