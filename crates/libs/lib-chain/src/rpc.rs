//! # WebSocket JSON-RPC Client
//!
//! Minimal JSON-RPC 2.0 client over a single WebSocket connection, covering
//! exactly what the payment flow needs: request/response correlation and
//! long-lived subscriptions with server-push notifications.
//!
//! ## Connection model
//!
//! One socket per client, opened in [`RpcClient::connect`] and held for the
//! client's lifetime. A writer task drains an outbound channel into the sink;
//! a reader task routes every inbound frame either to the pending request it
//! answers or to the subscription channel it belongs to. There is no
//! automatic reconnect; when the socket drops, all pending requests fail with
//! a connection error and all subscription streams end.

use futures_util::{SinkExt, StreamExt};
use lib_core::error::{AppError, Result};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

/// Handshake bound; connects that exceed it surface as connection errors.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

struct ClientInner {
    endpoint: String,
    next_id: AtomicU64,
    alive: AtomicBool,
    pending: Mutex<HashMap<u64, oneshot::Sender<Result<Value>>>>,
    subs: Mutex<HashMap<String, mpsc::UnboundedSender<Value>>>,
    out_tx: mpsc::UnboundedSender<Message>,
}

impl ClientInner {
    fn new(endpoint: String, out_tx: mpsc::UnboundedSender<Message>) -> Arc<Self> {
        Arc::new(Self {
            endpoint,
            next_id: AtomicU64::new(1),
            alive: AtomicBool::new(true),
            pending: Mutex::new(HashMap::new()),
            subs: Mutex::new(HashMap::new()),
            out_tx,
        })
    }

    /// Route one inbound JSON-RPC payload.
    ///
    /// Frames with an `id` answer a pending request; frames with a `method`
    /// are subscription notifications. Anything else is logged and dropped.
    fn route(&self, value: Value) {
        if let Some(id) = value.get("id").and_then(Value::as_u64) {
            let Some(sender) = self.pending.lock().remove(&id) else {
                warn!("Response for unknown request id {}", id);
                return;
            };
            let outcome = if let Some(err) = value.get("error") {
                let msg = err
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown RPC error");
                Err(AppError::Rpc(msg.to_string()))
            } else {
                Ok(value.get("result").cloned().unwrap_or(Value::Null))
            };
            let _ = sender.send(outcome);
            return;
        }

        if value.get("method").is_some() {
            let Some(params) = value.get("params") else {
                warn!("Notification without params: {}", value);
                return;
            };
            let sub_id = match params.get("subscription") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    warn!("Notification without subscription id: {}", value);
                    return;
                }
            };
            let result = params.get("result").cloned().unwrap_or(Value::Null);

            let mut subs = self.subs.lock();
            match subs.get(&sub_id) {
                Some(tx) if tx.send(result).is_ok() => {}
                Some(_) => {
                    debug!("Subscription {} receiver dropped, removing", sub_id);
                    subs.remove(&sub_id);
                }
                None => debug!("Notification for unknown subscription {}", sub_id),
            }
            return;
        }

        warn!("Unroutable RPC frame: {}", value);
    }

    /// Fail everything in flight once the socket is gone.
    fn shutdown(&self) {
        self.alive.store(false, Ordering::SeqCst);

        for (_, sender) in self.pending.lock().drain() {
            let _ = sender.send(Err(AppError::Connection(
                "Connection closed before a response arrived.".to_string(),
            )));
        }

        // Dropping the senders ends every subscription stream.
        self.subs.lock().clear();
    }
}

/// JSON-RPC 2.0 client over one WebSocket connection.
///
/// Cheap to clone; all clones share the connection. See the module docs for
/// the connection model.
#[derive(Clone)]
pub struct RpcClient {
    inner: Arc<ClientInner>,
}

impl RpcClient {
    /// Open a WebSocket connection to `endpoint` and start the I/O tasks.
    ///
    /// All handshake failures (unreachable host, protocol rejection, timeout)
    /// surface as [`AppError::Connection`] with the underlying cause.
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let (ws, _response) = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(endpoint))
            .await
            .map_err(|_| {
                AppError::Connection(format!("Timed out connecting to {}", endpoint))
            })?
            .map_err(|e| AppError::Connection(format!("Failed to connect to {}: {}", endpoint, e)))?;

        let (mut sink, mut stream) = ws.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();
        let inner = ClientInner::new(endpoint.to_string(), out_tx);

        // Writer: drain the outbound channel into the sink.
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let closing = matches!(msg, Message::Close(_));
                if sink.send(msg).await.is_err() {
                    break;
                }
                if closing {
                    break;
                }
            }
        });

        // Reader: route every inbound frame until the socket ends.
        let reader = Arc::clone(&inner);
        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<Value>(&text) {
                        Ok(value) => reader.route(value),
                        Err(e) => warn!("Discarding unparseable RPC frame: {}", e),
                    },
                    Ok(Message::Close(_)) => {
                        debug!("Server closed the RPC connection");
                        break;
                    }
                    Ok(_) => {} // ping/pong/binary frames carry no RPC payload
                    Err(e) => {
                        warn!("WebSocket read error: {}", e);
                        break;
                    }
                }
            }
            reader.shutdown();
        });

        info!("🔗 Connected to chain RPC: {}", endpoint);
        Ok(Self { inner })
    }

    /// Endpoint URL this client was connected to.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Whether the socket is still up. No reconnect is attempted when it
    /// drops; callers decide whether to build a fresh client.
    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::SeqCst)
    }

    /// Close the connection. Pending requests fail and subscription streams
    /// end once the reader task observes the close.
    pub fn close(&self) {
        if self.inner.alive.swap(false, Ordering::SeqCst) {
            let _ = self.inner.out_tx.send(Message::Close(None));
            info!("Closed chain RPC connection to {}", self.inner.endpoint);
        }
    }

    /// Issue a single request and await its response.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value> {
        if !self.is_alive() {
            return Err(AppError::Connection(format!(
                "Connection to {} is closed",
                self.inner.endpoint
            )));
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let (tx, rx) = oneshot::channel();
        self.inner.pending.lock().insert(id, tx);

        debug!("→ {} (id {})", method, id);
        if self
            .inner
            .out_tx
            .send(Message::Text(body.to_string()))
            .is_err()
        {
            self.inner.pending.lock().remove(&id);
            return Err(AppError::Connection(
                "Connection closed while sending the request.".to_string(),
            ));
        }

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(AppError::Connection(
                "Connection closed before a response arrived.".to_string(),
            )),
        }
    }

    /// Start a subscription and return the notification stream.
    ///
    /// The server's reply to `method` is the subscription id; notifications
    /// for that id are routed onto the returned [`RpcSubscription`].
    pub async fn subscribe(
        &self,
        method: &str,
        params: Value,
        unsub_method: &str,
    ) -> Result<RpcSubscription> {
        let result = self.request(method, params).await?;
        let sub_id = match result {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(AppError::Rpc(format!(
                    "Unexpected subscription id payload: {}",
                    other
                )))
            }
        };

        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.subs.lock().insert(sub_id.clone(), tx);
        debug!("Subscribed via {} (subscription {})", method, sub_id);

        Ok(RpcSubscription {
            id: sub_id,
            unsub_method: unsub_method.to_string(),
            client: self.clone(),
            rx,
        })
    }
}

/// A live server-push subscription.
pub struct RpcSubscription {
    id: String,
    unsub_method: String,
    client: RpcClient,
    rx: mpsc::UnboundedReceiver<Value>,
}

impl RpcSubscription {
    /// Server-assigned subscription id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Next notification payload; `None` once the subscription or the
    /// connection has ended.
    pub async fn next(&mut self) -> Option<Value> {
        self.rx.recv().await
    }

    /// Stop the subscription locally and tell the server to drop it.
    ///
    /// Best-effort on a dead connection: local routing is removed either way.
    pub async fn unsubscribe(mut self) -> Result<()> {
        self.rx.close();
        self.client.inner.subs.lock().remove(&self.id);
        self.client
            .request(&self.unsub_method, json!([self.id]))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_inner() -> (Arc<ClientInner>, mpsc::UnboundedReceiver<Message>) {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        (ClientInner::new("wss://test.invalid".to_string(), out_tx), out_rx)
    }

    #[tokio::test]
    async fn test_route_response_to_pending_request() {
        let (inner, _out) = test_inner();
        let (tx, rx) = oneshot::channel();
        inner.pending.lock().insert(7, tx);

        inner.route(json!({"jsonrpc": "2.0", "id": 7, "result": "Paseo Testnet"}));

        let outcome = rx.await.expect("sender must resolve");
        assert_eq!(outcome.expect("result expected"), json!("Paseo Testnet"));
    }

    #[tokio::test]
    async fn test_route_error_response() {
        let (inner, _out) = test_inner();
        let (tx, rx) = oneshot::channel();
        inner.pending.lock().insert(3, tx);

        inner.route(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "error": {"code": -32601, "message": "Method not found"},
        }));

        let outcome = rx.await.expect("sender must resolve");
        match outcome {
            Err(AppError::Rpc(msg)) => assert!(msg.contains("Method not found")),
            other => panic!("expected Rpc error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_route_subscription_notification() {
        let (inner, _out) = test_inner();
        let (tx, mut rx) = mpsc::unbounded_channel();
        inner.subs.lock().insert("sub-1".to_string(), tx);

        inner.route(json!({
            "jsonrpc": "2.0",
            "method": "author_extrinsicUpdate",
            "params": {"subscription": "sub-1", "result": {"inBlock": "0xb1"}},
        }));

        let payload = rx.recv().await.expect("notification expected");
        assert_eq!(payload, json!({"inBlock": "0xb1"}));
    }

    #[tokio::test]
    async fn test_shutdown_fails_pending_and_ends_subscriptions() {
        let (inner, _out) = test_inner();
        let (req_tx, req_rx) = oneshot::channel();
        inner.pending.lock().insert(1, req_tx);
        let (sub_tx, mut sub_rx) = mpsc::unbounded_channel::<Value>();
        inner.subs.lock().insert("sub-9".to_string(), sub_tx);

        inner.shutdown();

        assert!(!inner.alive.load(Ordering::SeqCst));
        match req_rx.await.expect("sender must resolve") {
            Err(AppError::Connection(_)) => {}
            other => panic!("expected Connection error, got {:?}", other),
        }
        assert!(sub_rx.recv().await.is_none());
    }
}
