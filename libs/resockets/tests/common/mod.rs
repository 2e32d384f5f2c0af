//! Shared fixtures for resockets integration tests.

// not every test binary touches every fixture
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use resockets::{
    CloseInfo, EventKind, Result as SocketResult, SocketClient, SocketError, SocketEvent,
    Transport, TransportEvent, TransportSink, TransportStream,
};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Notify};
use url::Url;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Test-side handle to one scripted connection.
///
/// Frames pushed here arrive at the client as if the server sent them;
/// frames the client sends are captured in `sent`.
pub struct ConnHandle {
    events: mpsc::UnboundedSender<TransportEvent>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ConnHandle {
    /// Deliver an inbound frame to the client
    pub fn push_frame(&self, frame: impl Into<String>) {
        let _ = self.events.send(TransportEvent::Frame(frame.into()));
    }

    /// Surface a transport-level error without ending the connection
    pub fn push_error(&self, error: impl Into<String>) {
        let _ = self.events.send(TransportEvent::Error(error.into()));
    }

    /// Simulate an unexpected server-side close
    pub fn drop_connection(&self) {
        let _ = self.events.send(TransportEvent::Closed(Some(CloseInfo {
            code: 1006,
            reason: "connection dropped".into(),
        })));
    }

    /// Frames the client handed to the sink so far
    pub fn sent_frames(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

struct PreparedConn {
    events: mpsc::UnboundedReceiver<TransportEvent>,
    tx: mpsc::UnboundedSender<TransportEvent>,
    sent: Arc<Mutex<Vec<String>>>,
}

#[derive(Default)]
struct MockInner {
    script: Mutex<VecDeque<Option<PreparedConn>>>,
    connects: AtomicUsize,
}

/// Scripted transport double.
///
/// Each `connect` consumes the next script entry; an empty script
/// refuses the attempt. Clones share the script and counters, so a test
/// can keep a copy after handing one to the builder.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<MockInner>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful connection; returns the test-side handle
    pub fn expect_connection(&self) -> ConnHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));
        self.inner.script.lock().push_back(Some(PreparedConn {
            events: rx,
            tx: tx.clone(),
            sent: Arc::clone(&sent),
        }));
        ConnHandle { events: tx, sent }
    }

    /// Queue one refused connection attempt
    pub fn refuse_connection(&self) {
        self.inner.script.lock().push_back(None);
    }

    /// Number of establishment attempts made so far
    pub fn connect_count(&self) -> usize {
        self.inner.connects.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(
        &self,
        _endpoint: &Url,
    ) -> SocketResult<(Box<dyn TransportSink>, Box<dyn TransportStream>)> {
        self.inner.connects.fetch_add(1, Ordering::AcqRel);
        match self.inner.script.lock().pop_front() {
            Some(Some(conn)) => Ok((
                Box::new(MockSink {
                    sent: conn.sent,
                    events: conn.tx,
                }) as Box<dyn TransportSink>,
                Box::new(MockStream {
                    events: conn.events,
                    finished: false,
                }) as Box<dyn TransportStream>,
            )),
            _ => Err(SocketError::Transport("connection refused".into())),
        }
    }
}

struct MockSink {
    sent: Arc<Mutex<Vec<String>>>,
    events: mpsc::UnboundedSender<TransportEvent>,
}

#[async_trait]
impl TransportSink for MockSink {
    async fn send(&mut self, frame: String) -> SocketResult<()> {
        self.sent.lock().push(frame);
        Ok(())
    }

    async fn close(&mut self) -> SocketResult<()> {
        // the close handshake ends the read half as well
        let _ = self.events.send(TransportEvent::Closed(None));
        Ok(())
    }
}

struct MockStream {
    events: mpsc::UnboundedReceiver<TransportEvent>,
    finished: bool,
}

#[async_trait]
impl TransportStream for MockStream {
    async fn next_event(&mut self) -> Option<TransportEvent> {
        if self.finished {
            return None;
        }
        let event = self.events.recv().await;
        if matches!(event, Some(TransportEvent::Closed(_)) | None) {
            self.finished = true;
        }
        event
    }
}

/// Subscribe a channel-backed listener; the test awaits the receiver.
pub fn record_events(
    client: &SocketClient,
    kind: EventKind,
) -> mpsc::UnboundedReceiver<SocketEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    client.on(kind, move |event| {
        let _ = tx.send(event.clone());
    });
    rx
}

/// Next recorded event, or panic after two seconds
pub async fn next_event(rx: &mut mpsc::UnboundedReceiver<SocketEvent>) -> SocketEvent {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

/// Assert that no event arrives within `window`
pub async fn assert_quiet(rx: &mut mpsc::UnboundedReceiver<SocketEvent>, window: Duration) {
    if let Ok(Some(event)) = tokio::time::timeout(window, rx.recv()).await {
        panic!("unexpected event: {event:?}");
    }
}

/// A simple in-process WebSocket echo server for end-to-end tests
pub struct MockWsServer {
    pub addr: SocketAddr,
    shutdown: Arc<Notify>,
}

impl MockWsServer {
    /// Create and start a new echo server on a random loopback port
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                tokio::spawn(Self::handle_connection(stream));
                            }
                            Err(_) => break,
                        }
                    }
                    _ = shutdown_clone.notified() => break,
                }
            }
        });

        Self { addr, shutdown }
    }

    async fn handle_connection(stream: tokio::net::TcpStream) {
        use futures::{SinkExt, StreamExt};
        use tokio_tungstenite::accept_async;

        let ws_stream = match accept_async(stream).await {
            Ok(ws) => ws,
            Err(_) => return,
        };
        let (mut write, mut read) = ws_stream.split();

        while let Some(Ok(msg)) = read.next().await {
            if msg.is_text() {
                if write.send(msg).await.is_err() {
                    break;
                }
            } else if msg.is_close() {
                break;
            }
        }
    }

    /// WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockWsServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
