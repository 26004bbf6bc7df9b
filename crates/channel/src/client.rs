//! The live channel client.
//!
//! One [`LiveChannel`] per session. `connect` spawns a single background
//! task that dials the notification endpoint, dispatches incoming frames to
//! subscribers, forwards best-effort sends, and redials with exponential
//! backoff when the connection drops. Teardown goes through a
//! [`CancellationToken`] so `disconnect` is safe from any context.

use std::sync::{Arc, Mutex};

use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use crate::events::parse_frame;
use crate::reconnect::{next_delay, ReconnectConfig};
use crate::registry::{HandlerRegistry, SubscriptionId};
use crate::LiveEvent;

/// Outgoing frame shape, mirroring the incoming `{"event", "data"}` wire.
#[derive(Debug, Serialize)]
struct OutgoingFrame<'a> {
    event: &'a str,
    data: serde_json::Value,
}

/// State for one live connection (really: one connection task).
struct Connection {
    client_id: String,
    outgoing: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
}

/// The session-scoped live event channel.
///
/// Cheap to clone; clones share the same connection, registry, and
/// lifecycle, so unrelated components can hold their own handle.
#[derive(Clone)]
pub struct LiveChannel {
    inner: Arc<ChannelInner>,
}

struct ChannelInner {
    ws_url: String,
    reconnect: ReconnectConfig,
    registry: HandlerRegistry,
    connection: Mutex<Option<Connection>>,
}

impl LiveChannel {
    /// Create a channel targeting `ws_url` (e.g. `ws://host:5000`), not yet
    /// connected.
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                ws_url: ws_url.into().trim_end_matches('/').to_string(),
                reconnect: ReconnectConfig::default(),
                registry: HandlerRegistry::new(),
                connection: Mutex::new(None),
            }),
        }
    }

    /// Open the connection; idempotent.
    ///
    /// If a connection already exists it is returned unchanged: no second
    /// task, no new socket. Returns the client id identifying this
    /// connection. Must be called from within a tokio runtime.
    pub fn connect(&self) -> String {
        let mut slot = self
            .inner
            .connection
            .lock()
            .expect("connection lock poisoned");
        if let Some(connection) = slot.as_ref() {
            return connection.client_id.clone();
        }

        let client_id = uuid::Uuid::new_v4().to_string();
        let (outgoing, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        *slot = Some(Connection {
            client_id: client_id.clone(),
            outgoing,
            cancel: cancel.clone(),
        });

        let inner = Arc::clone(&self.inner);
        let task_client_id = client_id.clone();
        tokio::spawn(async move {
            inner.run(task_client_id, rx, cancel).await;
        });

        client_id
    }

    /// Whether a connection (task) currently exists.
    ///
    /// True from `connect` until `disconnect`, including while the task is
    /// between redial attempts.
    pub fn is_connected(&self) -> bool {
        self.inner
            .connection
            .lock()
            .expect("connection lock poisoned")
            .is_some()
    }

    /// Tear the connection down and clear state.
    ///
    /// Safe to call when already disconnected (no-op).
    pub fn disconnect(&self) {
        let connection = self
            .inner
            .connection
            .lock()
            .expect("connection lock poisoned")
            .take();
        if let Some(connection) = connection {
            connection.cancel.cancel();
            tracing::info!(client_id = %connection.client_id, "Live channel disconnect requested");
        }
    }

    /// Register `handler` for the named server event.
    pub fn subscribe<F>(&self, event: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&LiveEvent) + Send + Sync + 'static,
    {
        self.inner.registry.subscribe(event, handler)
    }

    /// Remove one subscription by id.
    pub fn unsubscribe(&self, event: &str, id: SubscriptionId) {
        self.inner.registry.unsubscribe(event, id);
    }

    /// Remove every handler for the named event.
    pub fn unsubscribe_all(&self, event: &str) {
        self.inner.registry.unsubscribe_all(event);
    }

    /// Best-effort send to the server.
    ///
    /// Dropped silently when no connection exists (no queueing, no error).
    /// Frames buffered while the task is between redials are discarded
    /// rather than replayed onto a fresh connection.
    pub fn emit(&self, event: &str, data: serde_json::Value) {
        let slot = self
            .inner
            .connection
            .lock()
            .expect("connection lock poisoned");
        match slot.as_ref() {
            Some(connection) => {
                let frame = serde_json::to_string(&OutgoingFrame { event, data })
                    .expect("outgoing frame is always serialisable");
                let _ = connection.outgoing.send(frame);
            }
            None => {
                tracing::debug!(event, "No live connection, dropping emit");
            }
        }
    }

    /// Parse one raw text frame and dispatch it to subscribers.
    ///
    /// Called by the connection task for every incoming text frame; public
    /// so embedding shells and tests can inject frames without a socket.
    pub fn process_frame(&self, text: &str) {
        self.inner.process_frame(text);
    }
}

impl ChannelInner {
    fn process_frame(&self, text: &str) {
        match parse_frame(text) {
            Ok(event) => {
                let delivered = self.registry.dispatch(&event);
                tracing::debug!(event = event.name(), delivered, "Dispatched live event");
            }
            Err(e) => {
                tracing::warn!(error = %e, raw = %text, "Unknown or malformed live frame");
            }
        }
    }

    /// Connection task: dial, run the session, back off, redial.
    async fn run(
        &self,
        client_id: String,
        mut rx: mpsc::UnboundedReceiver<String>,
        cancel: CancellationToken,
    ) {
        let url = format!("{}/ws?clientId={client_id}", self.ws_url);
        let mut delay = self.reconnect.initial_delay;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                result = connect_async(&url) => match result {
                    Ok((ws_stream, _response)) => {
                        // Connection established.
                        tracing::info!(client_id = %client_id, "Live channel connected");
                        delay = self.reconnect.initial_delay;

                        self.run_session(ws_stream, &mut rx, &cancel).await;
                        if cancel.is_cancelled() {
                            break;
                        }
                        // Connection lost.
                        tracing::warn!(client_id = %client_id, "Live channel connection lost, reconnecting");
                    }
                    Err(e) => {
                        // Connection error.
                        tracing::warn!(client_id = %client_id, error = %e, "Live channel connection error");
                    }
                }
            }

            // Wait before redialing, respecting teardown.
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
            delay = next_delay(delay, &self.reconnect);

            // Sends buffered while offline are dropped, not replayed.
            while rx.try_recv().is_ok() {}
        }

        tracing::info!(client_id = %client_id, "Live channel closed");
    }

    /// Drive one WebSocket session until it ends or teardown is requested.
    async fn run_session(
        &self,
        ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
        rx: &mut mpsc::UnboundedReceiver<String>,
        cancel: &CancellationToken,
    ) {
        let (mut sink, mut stream) = ws_stream.split();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
                frame = rx.recv() => match frame {
                    Some(json) => {
                        if let Err(e) = sink.send(Message::Text(json)).await {
                            tracing::warn!(error = %e, "Failed to send live frame");
                            break;
                        }
                    }
                    // The channel handle is gone; nothing left to forward.
                    None => break,
                },
                msg = stream.next() => match msg {
                    Some(Ok(Message::Text(text))) => self.process_frame(&text),
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                        // Handled automatically by tungstenite.
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(?frame, "Server closed live channel");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Binary / Frame — ignore.
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Live channel receive error");
                        break;
                    }
                    None => break,
                }
            }
        }
    }
}
