use crate::traits::error::{Result, SocketError};
use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

/// Close metadata delivered with a [`TransportEvent::Closed`] signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInfo {
    pub code: u16,
    pub reason: String,
}

/// Signals produced by a transport read half
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A complete inbound text frame
    Frame(String),
    /// Transport-level error description
    Error(String),
    /// Orderly close, with the peer's close frame when one was sent
    Closed(Option<CloseInfo>),
}

/// Connection factory injected into the client.
///
/// Implementations open one bidirectional frame-oriented connection per
/// call and hand back split write/read halves. The client never touches
/// the network outside this boundary, which is what lets the reconnect
/// logic run against a scripted double in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn connect(
        &self,
        endpoint: &Url,
    ) -> Result<(Box<dyn TransportSink>, Box<dyn TransportStream>)>;
}

/// Write half of an open connection
#[async_trait]
pub trait TransportSink: Send {
    /// Hand one text frame to the transport layer
    async fn send(&mut self, frame: String) -> Result<()>;

    /// Start the close handshake
    async fn close(&mut self) -> Result<()>;
}

/// Read half of an open connection
#[async_trait]
pub trait TransportStream: Send {
    /// Next signal, or `None` once the connection is finished
    async fn next_event(&mut self) -> Option<TransportEvent>;
}

/// Production transport over tokio-tungstenite
pub struct WsTransport;

#[async_trait]
impl Transport for WsTransport {
    async fn connect(
        &self,
        endpoint: &Url,
    ) -> Result<(Box<dyn TransportSink>, Box<dyn TransportStream>)> {
        let (ws_stream, _response) = connect_async(endpoint.as_str())
            .await
            .map_err(|e| SocketError::Transport(e.to_string()))?;
        let (write, read) = ws_stream.split();

        Ok((
            Box::new(WsSink { write }),
            Box::new(WsStream {
                read,
                finished: false,
            }),
        ))
    }
}

type WsWriteHalf = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsReadHalf = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

struct WsSink {
    write: WsWriteHalf,
}

#[async_trait]
impl TransportSink for WsSink {
    async fn send(&mut self, frame: String) -> Result<()> {
        self.write
            .send(Message::Text(frame))
            .await
            .map_err(|e| SocketError::Transport(e.to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        self.write
            .close()
            .await
            .map_err(|e| SocketError::Transport(e.to_string()))
    }
}

struct WsStream {
    read: WsReadHalf,
    finished: bool,
}

#[async_trait]
impl TransportStream for WsStream {
    async fn next_event(&mut self) -> Option<TransportEvent> {
        if self.finished {
            return None;
        }
        loop {
            match self.read.next().await {
                Some(Ok(Message::Text(text))) => return Some(TransportEvent::Frame(text)),
                Some(Ok(Message::Binary(data))) => {
                    // the wire format is JSON text; binary frames are dropped
                    tracing::warn!("dropping unexpected binary frame ({} bytes)", data.len());
                }
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                    // tungstenite answers pings during flush; nothing to surface
                }
                Some(Ok(Message::Close(frame))) => {
                    self.finished = true;
                    return Some(TransportEvent::Closed(frame.map(|f| CloseInfo {
                        code: f.code.into(),
                        reason: f.reason.into_owned(),
                    })));
                }
                Some(Ok(Message::Frame(_))) => {
                    // raw frames never reach a client read half
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(TransportEvent::Error(e.to_string()));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}
