use super::config::ClientConfig;
use super::connection_state::{
    AtomicConnectionState, AtomicMetrics, ConnectionState, MetricsSnapshot,
};
use super::events::{EventKind, ListenerId, ListenerTable, SocketEvent};
use crate::traits::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};
use url::Url;

/// Reconnecting WebSocket client.
///
/// Owns at most one live transport handle at a time and hides the
/// reconnection mechanics from callers: an unexpected disconnect is
/// retried on the configured schedule until the attempt budget runs out
/// or [`close()`](Self::close) is called. Progress is reported through
/// the listener registry (`open`, `message`, `close`, `error`); no
/// network condition ever surfaces as a returned error.
///
/// Once `close()` has been called the instance is done for good:
/// further `connect()` calls are ignored.
#[derive(Clone)]
pub struct SocketClient {
    config: ClientConfig,
    retry: Arc<dyn RetryPolicy>,
    transport: Arc<dyn Transport>,
    listeners: Arc<ListenerTable>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    reconnect_attempts: Arc<AtomicUsize>,
    intentional_close: Arc<AtomicBool>,
    sink: Arc<AsyncMutex<Option<Box<dyn TransportSink>>>>,
}

impl std::fmt::Debug for SocketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketClient")
            .field("config", &self.config)
            .field("state", &self.state.get())
            .field(
                "reconnect_attempts",
                &self.reconnect_attempts.load(Ordering::Acquire),
            )
            .field(
                "intentional_close",
                &self.intentional_close.load(Ordering::Acquire),
            )
            .finish_non_exhaustive()
    }
}

impl SocketClient {
    /// Called by the builder; use `resockets::builder()` to create a
    /// client.
    pub(crate) fn new(
        config: ClientConfig,
        retry: Box<dyn RetryPolicy>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            retry: Arc::from(retry),
            transport,
            listeners: Arc::new(ListenerTable::new()),
            state: Arc::new(AtomicConnectionState::new(ConnectionState::Idle)),
            metrics: Arc::new(AtomicMetrics::new()),
            reconnect_attempts: Arc::new(AtomicUsize::new(0)),
            intentional_close: Arc::new(AtomicBool::new(false)),
            sink: Arc::new(AsyncMutex::new(None)),
        }
    }

    /// Open the connection and start the reconnect driver.
    ///
    /// Returns immediately; establishment progress arrives through the
    /// `open`, `error` and `close` events. Calling this while a
    /// previous driver is still live is a caller-contract violation
    /// (the newer driver wins). Calling it after `close()` does
    /// nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(&self) {
        if self.intentional_close.load(Ordering::Acquire) {
            warn!("connect() called on an intentionally closed client, ignoring");
            return;
        }
        let driver = Driver {
            config: self.config.clone(),
            retry: Arc::clone(&self.retry),
            transport: Arc::clone(&self.transport),
            listeners: Arc::clone(&self.listeners),
            state: Arc::clone(&self.state),
            metrics: Arc::clone(&self.metrics),
            reconnect_attempts: Arc::clone(&self.reconnect_attempts),
            intentional_close: Arc::clone(&self.intentional_close),
            sink: Arc::clone(&self.sink),
        };
        tokio::spawn(driver.run());
    }

    /// Serialize `payload` to JSON and hand it to the transport.
    ///
    /// When the connection is not open this is a warn-level no-op: the
    /// payload is dropped, never queued. The only returned error is a
    /// payload that fails serialization; a transport-level send failure
    /// surfaces on the `error` event instead.
    pub async fn send<T: Serialize + ?Sized>(&self, payload: &T) -> Result<()> {
        let frame = serde_json::to_string(payload)?;

        if !self.state.is_open() {
            warn!("socket is not open, dropping outbound frame");
            return Ok(());
        }

        let mut sink = self.sink.lock().await;
        match sink.as_mut() {
            Some(handle) => {
                if let Err(e) = handle.send(frame).await {
                    warn!("transport rejected outbound frame: {e}");
                    self.listeners.emit(&SocketEvent::Error(e.to_string()));
                } else {
                    self.metrics.increment_sent();
                }
            }
            None => warn!("socket is not open, dropping outbound frame"),
        }
        Ok(())
    }

    /// Close the connection for good.
    ///
    /// Sets the intentional-close flag (permanent for this instance),
    /// then closes the live transport handle if one exists. Idempotent,
    /// and safe to call while a reconnect timer is pending: the driver
    /// re-checks the flag when the timer fires, so a backoff window
    /// cannot resurrect the connection.
    pub async fn close(&self) {
        let already = self.intentional_close.swap(true, Ordering::AcqRel);
        if !already {
            info!("closing socket client");
        }

        let mut sink = self.sink.lock().await;
        if let Some(mut handle) = sink.take() {
            if let Err(e) = handle.close().await {
                debug!("close handshake failed: {e}");
            }
        }
    }

    /// Register `callback` for every future occurrence of `kind`.
    ///
    /// Listeners fire in registration order; registering the same
    /// callback twice makes it fire twice.
    pub fn on(
        &self,
        kind: EventKind,
        callback: impl Fn(&SocketEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.add(kind, callback)
    }

    /// Remove one registration; unknown ids are a no-op.
    pub fn off(&self, kind: EventKind, id: ListenerId) {
        self.listeners.remove(kind, id);
    }

    /// Current lifecycle state.
    ///
    /// [`ConnectionState::Exhausted`] is how callers distinguish "still
    /// retrying" from "gave up" after the attempt budget is spent.
    #[inline]
    pub fn connection_state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Check if the transport is open
    #[inline]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Retries made since the last successful open
    #[inline]
    pub fn reconnect_attempts(&self) -> usize {
        self.reconnect_attempts.load(Ordering::Acquire)
    }

    /// Current counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Remote endpoint this client dials
    pub fn endpoint(&self) -> &Url {
        self.config.endpoint()
    }
}

/// State shared between the public handle and the spawned driver task.
struct Driver {
    config: ClientConfig,
    retry: Arc<dyn RetryPolicy>,
    transport: Arc<dyn Transport>,
    listeners: Arc<ListenerTable>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    reconnect_attempts: Arc<AtomicUsize>,
    intentional_close: Arc<AtomicBool>,
    sink: Arc<AsyncMutex<Option<Box<dyn TransportSink>>>>,
}

impl Driver {
    /// Connection loop: establish, pump, and retry on the configured
    /// schedule until closed or exhausted.
    async fn run(self) {
        loop {
            if self.intentional_close.load(Ordering::Acquire) {
                debug!("intentional close observed, driver exiting");
                break;
            }

            self.state.set(ConnectionState::Connecting);
            info!("connecting to {}", self.config.endpoint());

            match self.transport.connect(self.config.endpoint()).await {
                Ok((mut sink_half, stream_half)) => {
                    // close() may have won the race while the handshake
                    // was in flight; discard the fresh handle if so
                    if self.intentional_close.load(Ordering::Acquire) {
                        debug!("closed while establishing, discarding fresh handle");
                        let _ = sink_half.close().await;
                        self.state.set(ConnectionState::Closed);
                        self.listeners.emit(&SocketEvent::Close(None));
                        break;
                    }

                    *self.sink.lock().await = Some(sink_half);
                    self.reconnect_attempts.store(0, Ordering::Release);
                    self.state.set(ConnectionState::Open);
                    info!("connected to {}", self.config.endpoint());
                    self.listeners.emit(&SocketEvent::Open);

                    let close_info = self.pump(stream_half).await;

                    self.sink.lock().await.take();
                    self.state.set(ConnectionState::Closed);
                    self.listeners.emit(&SocketEvent::Close(close_info));
                }
                Err(e) => {
                    warn!("connection attempt failed: {e}");
                    self.listeners.emit(&SocketEvent::Error(e.to_string()));
                    // a failed open surfaces like a dropped socket:
                    // error first, then close
                    self.state.set(ConnectionState::Closed);
                    self.listeners.emit(&SocketEvent::Close(None));
                }
            }

            if self.intentional_close.load(Ordering::Acquire) {
                debug!("client closed, driver exiting");
                break;
            }

            let attempt = self.reconnect_attempts.load(Ordering::Acquire);
            let Some(delay) = self.retry.next_delay(attempt) else {
                warn!("max reconnection attempts reached ({attempt}), giving up");
                self.state.set(ConnectionState::Exhausted);
                break;
            };

            let made = self.reconnect_attempts.fetch_add(1, Ordering::AcqRel) + 1;
            self.metrics.increment_reconnects();
            info!(
                "attempting to reconnect in {:?} ({}/{})",
                delay,
                made,
                self.config.max_reconnect_attempts()
            );
            tokio::time::sleep(delay).await;

            // the timer may fire after close() was called during the
            // backoff window; re-check before dialing again
            if self.intentional_close.load(Ordering::Acquire) {
                debug!("closed during backoff, driver exiting");
                break;
            }
        }
    }

    /// Pump the read half until the connection ends; returns the close
    /// metadata when the peer sent any.
    async fn pump(&self, mut stream: Box<dyn TransportStream>) -> Option<CloseInfo> {
        while let Some(event) = stream.next_event().await {
            match event {
                TransportEvent::Frame(text) => {
                    self.metrics.increment_received();
                    match serde_json::from_str::<serde_json::Value>(&text) {
                        Ok(body) => self.listeners.emit(&SocketEvent::Message(body)),
                        Err(e) => warn!("dropping unparseable frame: {e}"),
                    }
                }
                TransportEvent::Error(e) => {
                    // an error alone does not end the connection; a
                    // Closed signal or stream end drives that
                    warn!("transport error: {e}");
                    self.listeners.emit(&SocketEvent::Error(e));
                }
                TransportEvent::Closed(info) => {
                    if let Some(ref info) = info {
                        debug!("peer closed: code={}, reason='{}'", info.code, info.reason);
                    }
                    return info;
                }
            }
        }
        None
    }
}
