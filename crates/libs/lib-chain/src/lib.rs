//! # Chain Library
//!
//! Connection management for a Substrate-style WebSocket JSON-RPC endpoint:
//! a live [`ChainSession`] with explicit open/close lifecycle, chain metadata
//! queries, and extrinsic submit-and-watch subscriptions surfaced as neutral
//! [`TxStatusEvent`] values.
//!
//! The [`TransferBackend`] trait is the seam the payment engine submits
//! through; [`ChainSession`] is the live implementation and tests substitute
//! in-process mocks.

pub mod event;
pub mod rpc;
pub mod session;
pub mod unsub;

// Re-export commonly used types
pub use event::TxStatusEvent;
pub use rpc::{RpcClient, RpcSubscription};
pub use session::{ChainInfo, ChainSession, TransferBackend, TxWatch};
pub use unsub::Unsubscribe;
