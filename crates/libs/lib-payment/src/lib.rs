//! # Payment Library
//!
//! The payment submission engine and transaction state machine: build a
//! transfer intent, convert the entered amount exactly into minimal units,
//! orchestrate signing and broadcast, and reduce the network's acknowledgement
//! callbacks into a UI-consumable [`TransactionState`].
//!
//! The reducer is a pure function over [`PaymentEvent`]s, so the whole state
//! machine is testable without a wallet or a network; the engine wires it to
//! the [`TransferBackend`](lib_chain::TransferBackend) and
//! [`AccountProvider`](lib_wallet::AccountProvider) seams.

pub mod engine;
pub mod reducer;
pub mod state;
pub mod units;

// Re-export commonly used types
pub use engine::{PaymentConfig, PaymentEngine};
pub use reducer::PaymentEvent;
pub use state::{TransactionState, TransactionStatus};
pub use units::parse_amount;
