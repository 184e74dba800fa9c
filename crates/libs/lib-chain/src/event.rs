//! # Transaction Status Events
//!
//! Neutral event type for the multi-stage acknowledgement lifecycle a
//! submitted extrinsic goes through. The raw subscription payloads from
//! `author_submitAndWatchExtrinsic` are parsed here so that nothing above
//! the chain session ever touches wire JSON.

use serde_json::Value;
use tracing::warn;

/// One status notification for a watched extrinsic.
///
/// The node delivers these in non-decreasing lifecycle order for a single
/// transaction (`InBlock` before `Finalized`), but consumers must tolerate
/// seeing only a subset, e.g. an error before the transaction ever reaches a
/// block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatusEvent {
    /// Accepted into the node's transaction pool
    Ready,
    /// Gossiped to network peers
    Broadcast,
    /// Included in a (not yet final) block
    InBlock { block_hash: String },
    /// The including block was retracted; the transaction is back in the pool
    Retracted { block_hash: String },
    /// No finality within the node's bound; the watch ends here
    FinalityTimeout { block_hash: String },
    /// Included in a finalized block
    Finalized { block_hash: String },
    /// Replaced in the pool by another transaction with the same priority
    Usurped { tx_hash: String },
    /// Dropped from the pool without inclusion
    Dropped,
    /// Rejected as invalid by the pool
    Invalid,
    /// The chain executed the transaction and reported a dispatch error
    DispatchError { message: String },
}

impl TxStatusEvent {
    /// Whether this event ends the watch for the transaction.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TxStatusEvent::Finalized { .. }
                | TxStatusEvent::FinalityTimeout { .. }
                | TxStatusEvent::Usurped { .. }
                | TxStatusEvent::Dropped
                | TxStatusEvent::Invalid
                | TxStatusEvent::DispatchError { .. }
        )
    }

    /// Parse one raw subscription payload.
    ///
    /// Plain statuses arrive as strings (`"ready"`, `"dropped"`); statuses
    /// carrying a hash arrive as single-key objects (`{"inBlock": "0x…"}`).
    /// Unknown shapes are skipped with a warning rather than failing the
    /// whole watch.
    pub fn parse(raw: &Value) -> Option<Self> {
        if let Some(status) = raw.as_str() {
            return match status {
                "ready" => Some(TxStatusEvent::Ready),
                "broadcast" => Some(TxStatusEvent::Broadcast),
                "dropped" => Some(TxStatusEvent::Dropped),
                "invalid" => Some(TxStatusEvent::Invalid),
                other => {
                    warn!("Unknown transaction status string: {}", other);
                    None
                }
            };
        }

        let obj = raw.as_object()?;

        if obj.contains_key("broadcast") {
            return Some(TxStatusEvent::Broadcast);
        }
        if let Some(hash) = obj.get("inBlock").and_then(Value::as_str) {
            return Some(TxStatusEvent::InBlock {
                block_hash: hash.to_string(),
            });
        }
        if let Some(hash) = obj.get("retracted").and_then(Value::as_str) {
            return Some(TxStatusEvent::Retracted {
                block_hash: hash.to_string(),
            });
        }
        if let Some(hash) = obj.get("finalityTimeout").and_then(Value::as_str) {
            return Some(TxStatusEvent::FinalityTimeout {
                block_hash: hash.to_string(),
            });
        }
        if let Some(hash) = obj.get("finalized").and_then(Value::as_str) {
            return Some(TxStatusEvent::Finalized {
                block_hash: hash.to_string(),
            });
        }
        if let Some(hash) = obj.get("usurped").and_then(Value::as_str) {
            return Some(TxStatusEvent::Usurped {
                tx_hash: hash.to_string(),
            });
        }

        warn!("Unknown transaction status payload: {}", raw);
        None
    }
}
