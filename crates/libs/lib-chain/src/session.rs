//! # Chain Session
//!
//! High-level handle over the RPC client with an explicit lifecycle: opened
//! once with [`ChainSession::connect`], shared read-only by every payment
//! attempt, closed explicitly (or on process teardown). One session, many
//! independent transaction watches.

use crate::event::TxStatusEvent;
use crate::rpc::RpcClient;
use crate::unsub::Unsubscribe;
use async_trait::async_trait;
use lib_core::dto::transfer::SignedTransfer;
use lib_core::error::{AppError, Result};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Chain identity returned by the node's system queries.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChainInfo {
    pub chain: String,
    pub node_name: String,
    pub node_version: String,
}

/// A watched, in-flight extrinsic: the status stream plus the handle that
/// detaches it.
pub struct TxWatch {
    /// Status events in the order the node delivers them
    pub events: mpsc::UnboundedReceiver<TxStatusEvent>,
    /// Detaches the watch; never cancels the broadcast transaction
    pub unsub: Unsubscribe,
}

/// Submission seam between the payment engine and the chain.
///
/// [`ChainSession`] is the live implementation; tests drive the engine with
/// in-process mocks emitting scripted status sequences.
#[async_trait]
pub trait TransferBackend: Send + Sync {
    /// Whether the underlying connection is usable for a submission.
    fn is_alive(&self) -> bool;

    /// Broadcast a signed transfer and watch its acknowledgement lifecycle.
    async fn submit_and_watch(&self, transfer: &SignedTransfer) -> Result<TxWatch>;
}

/// The one long-lived connection to the chain RPC endpoint.
pub struct ChainSession {
    rpc: RpcClient,
}

impl ChainSession {
    /// Connect to a WebSocket RPC endpoint.
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let rpc = RpcClient::connect(endpoint).await?;
        Ok(Self { rpc })
    }

    pub fn endpoint(&self) -> &str {
        self.rpc.endpoint()
    }

    pub fn is_alive(&self) -> bool {
        self.rpc.is_alive()
    }

    /// Close the session. In-flight watches end; nothing reconnects.
    pub fn close(&self) {
        self.rpc.close();
    }

    /// Fetch the chain identity, issuing the three system queries
    /// concurrently.
    pub async fn chain_info(&self) -> Result<ChainInfo> {
        let (chain, node_name, node_version) = tokio::try_join!(
            self.system_string("system_chain"),
            self.system_string("system_name"),
            self.system_string("system_version"),
        )?;

        info!("Connected to chain {} using {} v{}", chain, node_name, node_version);
        Ok(ChainInfo {
            chain,
            node_name,
            node_version,
        })
    }

    /// Hash of the genesis block, hex-encoded.
    pub async fn genesis_hash(&self) -> Result<String> {
        let value = self.rpc.request("chain_getBlockHash", json!([0])).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Rpc(format!("Unexpected genesis hash payload: {}", value)))
    }

    async fn system_string(&self, method: &str) -> Result<String> {
        let value = self.rpc.request(method, json!([])).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Rpc(format!("Unexpected {} payload: {}", method, value)))
    }
}

#[async_trait]
impl TransferBackend for ChainSession {
    fn is_alive(&self) -> bool {
        self.rpc.is_alive()
    }

    /// Submit via `author_submitAndWatchExtrinsic` and forward parsed status
    /// events until the watch is detached or the stream ends.
    async fn submit_and_watch(&self, transfer: &SignedTransfer) -> Result<TxWatch> {
        let mut sub = self
            .rpc
            .subscribe(
                "author_submitAndWatchExtrinsic",
                json!([transfer.extrinsic]),
                "author_unwatchExtrinsic",
            )
            .await?;

        debug!("Watching extrinsic {} (subscription {})", transfer.tx_hash, sub.id());

        let (evt_tx, evt_rx) = mpsc::unbounded_channel();
        let unsub = Unsubscribe::new();
        let mut signal = unsub.signal();
        let tx_hash = transfer.tx_hash.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    changed = signal.changed() => {
                        // A failed watch means every Unsubscribe clone is
                        // gone, so nobody is listening either way.
                        if changed.is_ok() && *signal.borrow() {
                            if let Err(e) = sub.unsubscribe().await {
                                warn!("Failed to unwatch extrinsic {}: {}", tx_hash, e);
                            }
                        }
                        break;
                    }
                    raw = sub.next() => match raw {
                        Some(payload) => {
                            let Some(event) = TxStatusEvent::parse(&payload) else {
                                continue;
                            };
                            if evt_tx.send(event).is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        });

        Ok(TxWatch {
            events: evt_rx,
            unsub,
        })
    }
}
