//! # Payment Submission Engine
//!
//! Orchestrates one payment attempt end to end: local precondition checks,
//! exact unit conversion, signer acquisition, broadcast, and forwarding of
//! the network's status callbacks through the reducer onto a shared
//! [`watch`](tokio::sync::watch) channel of [`TransactionState`].
//!
//! ## Error policy
//!
//! Every failure from the wallet provider or the chain backend is converted
//! here into a terminal `error` state with a display-ready message; nothing
//! propagates as a panic into the caller, and nothing retries automatically.
//! A retry is always a fresh, user-initiated attempt after a reset.

use crate::reducer::{self, PaymentEvent};
use crate::state::TransactionState;
use crate::units;
use lib_chain::event::TxStatusEvent;
use lib_chain::session::{TransferBackend, TxWatch};
use lib_chain::unsub::Unsubscribe;
use lib_core::config::Config;
use lib_core::dto::transfer::{TransferCall, TransferIntent};
use lib_core::error::{AppError, Result};
use lib_utils::format::format_hash;
use lib_utils::validation::validate_not_empty;
use lib_wallet::account::AccountProvider;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Per-engine payment settings. Chain-specific constants come from
/// [`Config`]; nothing is hard-coded at the submission site.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Decimal count of the chain's display unit
    pub decimals: u32,
    /// Which balance-transfer call to sign
    pub transfer_call: TransferCall,
    /// Optional bound on waiting for a terminal status; disabled by default
    pub confirmation_timeout: Option<Duration>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            decimals: 10,
            transfer_call: TransferCall::KeepAlive,
            confirmation_timeout: None,
        }
    }
}

impl From<&Config> for PaymentConfig {
    fn from(config: &Config) -> Self {
        Self {
            decimals: config.chain_decimals,
            transfer_call: config.transfer_call,
            confirmation_timeout: config.confirmation_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// The payment submission engine.
///
/// One engine serves many sequential attempts; each attempt's mutable state
/// lives in the shared [`TransactionState`], observed via
/// [`subscribe`](PaymentEngine::subscribe).
pub struct PaymentEngine {
    backend: Arc<dyn TransferBackend>,
    config: PaymentConfig,
    state_tx: Arc<watch::Sender<TransactionState>>,
    // Detach handle of the in-flight attempt's watch, if any.
    active: Mutex<Option<Unsubscribe>>,
    // Keeps the channel open even when no caller is subscribed.
    _state_rx: watch::Receiver<TransactionState>,
}

impl PaymentEngine {
    pub fn new(backend: Arc<dyn TransferBackend>, config: PaymentConfig) -> Self {
        let (state_tx, state_rx) = watch::channel(TransactionState::idle());
        Self {
            backend,
            config,
            state_tx: Arc::new(state_tx),
            active: Mutex::new(None),
            _state_rx: state_rx,
        }
    }

    /// Observe state updates. The receiver always yields the latest state.
    pub fn subscribe(&self) -> watch::Receiver<TransactionState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TransactionState {
        self.state_tx.borrow().clone()
    }

    /// Return to the exact initial idle state, clearing hash, block hash,
    /// message, and timestamp. Any in-flight watch is detached first.
    pub fn reset(&self) {
        self.detach_active();
        send_event(&self.state_tx, &PaymentEvent::Reset);
    }

    /// Fire the previous attempt's watch so a stale forwarder cannot touch
    /// the next attempt's state.
    fn detach_active(&self) {
        if let Some(previous) = self.active.lock().take() {
            previous.call();
        }
    }

    /// Submit a transfer from the provider's selected account.
    ///
    /// Precondition failures (no account, dead connection, malformed input)
    /// resolve synchronously into a terminal error state without any network
    /// round-trip. On success the returned [`Unsubscribe`] stops local
    /// status updates when fired; it never cancels the broadcast
    /// transaction itself.
    pub async fn submit(
        &self,
        provider: &AccountProvider,
        recipient: &str,
        amount: &str,
    ) -> Result<Unsubscribe> {
        // A new attempt discards any previous outcome and its watch.
        self.detach_active();
        send_event(&self.state_tx, &PaymentEvent::Reset);

        let Some(account) = provider.selected() else {
            return Err(self.fail(AppError::NoAccount("no account selected".to_string())));
        };
        if !self.backend.is_alive() {
            return Err(self.fail(AppError::Connection(
                "chain session is not established".to_string(),
            )));
        }
        if let Err(msg) = validate_not_empty(recipient, "Recipient address") {
            return Err(self.fail(AppError::Validation(format!("{}.", msg))));
        }
        let amount_minimal = match units::parse_amount(amount, self.config.decimals) {
            Ok(value) => value,
            Err(err) => return Err(self.fail(err)),
        };

        send_event(&self.state_tx, &PaymentEvent::Prepare);
        info!(
            "Preparing transfer of {} ({} minimal units) from {} to {}",
            amount,
            amount_minimal,
            format_hash(&account.address, 6, 4),
            format_hash(recipient, 6, 4)
        );

        let intent = TransferIntent {
            sender: account.address.clone(),
            recipient: recipient.to_string(),
            amount_display: amount.to_string(),
            amount_minimal,
            call: self.config.transfer_call,
        };

        let signer = match provider.signer_for_selected().await {
            Ok(signer) => signer,
            Err(err) => return Err(self.fail(err)),
        };

        send_event(&self.state_tx, &PaymentEvent::AwaitSignature);

        let signed = match signer.sign_transfer(&intent).await {
            Ok(signed) => signed,
            Err(err) => return Err(self.fail(err)),
        };

        let tx_watch = match self.backend.submit_and_watch(&signed).await {
            Ok(watch) => watch,
            Err(err) => return Err(self.fail(err)),
        };

        debug!("Broadcast accepted, watching {}", signed.tx_hash);
        let unsub = tx_watch.unsub.clone();
        *self.active.lock() = Some(unsub.clone());
        self.spawn_forwarder(tx_watch, signed.tx_hash);
        Ok(unsub)
    }

    /// Surface an error as a terminal state and hand it back to the caller.
    fn fail(&self, err: AppError) -> AppError {
        warn!("Payment attempt failed: {}", err);
        send_event(
            &self.state_tx,
            &PaymentEvent::Failed {
                message: err.user_message(),
            },
        );
        err
    }

    /// Forward status events through the reducer until a terminal state,
    /// detachment, or (when configured) the confirmation timeout.
    fn spawn_forwarder(&self, mut tx_watch: TxWatch, tx_hash: String) {
        let state_tx = Arc::clone(&self.state_tx);
        let timeout = self.config.confirmation_timeout;
        let unsub = tx_watch.unsub.clone();
        let mut detached = tx_watch.unsub.signal();

        tokio::spawn(async move {
            loop {
                // The caller's detach handle stops forwarding immediately,
                // even if the backend keeps its stream open.
                let next = if let Some(bound) = timeout {
                    tokio::select! {
                        biased;
                        _ = detached.changed() => {
                            debug!("Watch for {} detached", tx_hash);
                            break;
                        }
                        event = tokio::time::timeout(bound, tx_watch.events.recv()) => match event {
                            Ok(event) => event,
                            Err(_) => {
                                warn!(
                                    "No confirmation for {} within {:?}; detaching watch",
                                    tx_hash, bound
                                );
                                send_event(
                                    &state_tx,
                                    &PaymentEvent::Failed {
                                        message:
                                            "No confirmation received from the network within the configured timeout."
                                                .to_string(),
                                    },
                                );
                                unsub.call();
                                break;
                            }
                        },
                    }
                } else {
                    tokio::select! {
                        biased;
                        _ = detached.changed() => {
                            debug!("Watch for {} detached", tx_hash);
                            break;
                        }
                        event = tx_watch.events.recv() => event,
                    }
                };

                // Stream end means the watch was detached or the connection
                // is gone; there is nothing further to report.
                let Some(status) = next else { break };
                // An event dequeued concurrently with a detach must not be
                // published.
                if unsub.is_fired() {
                    break;
                }
                debug!("Status for {}: {:?}", tx_hash, status);

                let Some(event) = map_status(status, &tx_hash) else {
                    continue;
                };
                send_event(&state_tx, &event);

                if state_tx.borrow().is_terminal() {
                    unsub.call();
                    break;
                }
            }
        });
    }
}

/// Map a neutral chain status onto a reducer event. Pool-level churn that
/// changes nothing user-visible maps to `None`.
fn map_status(status: TxStatusEvent, tx_hash: &str) -> Option<PaymentEvent> {
    match status {
        TxStatusEvent::Ready | TxStatusEvent::Broadcast => None,
        // The transaction is back in the pool; the next inclusion will
        // report a fresh block hash.
        TxStatusEvent::Retracted { .. } => None,
        TxStatusEvent::InBlock { block_hash } => Some(PaymentEvent::Included {
            tx_hash: tx_hash.to_string(),
            block_hash,
        }),
        TxStatusEvent::Finalized { block_hash } => Some(PaymentEvent::Finalized {
            tx_hash: tx_hash.to_string(),
            block_hash,
        }),
        TxStatusEvent::FinalityTimeout { .. } => Some(PaymentEvent::Failed {
            message: "The network did not finalize the transaction in time.".to_string(),
        }),
        TxStatusEvent::Usurped { .. } => Some(PaymentEvent::Failed {
            message: "The transaction was replaced in the pool before inclusion.".to_string(),
        }),
        TxStatusEvent::Dropped => Some(PaymentEvent::Failed {
            message: "The transaction was dropped from the pool before inclusion.".to_string(),
        }),
        TxStatusEvent::Invalid => Some(PaymentEvent::Failed {
            message: "The transaction was rejected as invalid.".to_string(),
        }),
        TxStatusEvent::DispatchError { message } => {
            Some(PaymentEvent::DispatchFailed { error: message })
        }
    }
}

/// Apply one event through the reducer and publish the result.
fn send_event(state_tx: &watch::Sender<TransactionState>, event: &PaymentEvent) {
    let next = {
        let current = state_tx.borrow();
        reducer::apply(&current, event)
    };
    let _ = state_tx.send(next);
}
