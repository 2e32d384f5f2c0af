//! Diagnostic tap for the community chat socket.
//!
//! Connects to a channel endpoint, decodes every frame the server
//! pushes, and logs it. Ctrl+C closes the socket and exits.

use anyhow::Result;
use chatwire::{channel_endpoint, ServerFrame};
use resockets::{EventKind, SocketEvent};
use std::time::Duration;
use studyhall::bin_common::{config_path_from_env, init_logging};
use studyhall::config::TapConfig;
use tracing::{info, warn};
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = TapConfig::load(config_path_from_env())?;
    init_logging(&config.log_level);
    config.log();

    let base = Url::parse(&config.endpoint)?;
    let endpoint = channel_endpoint(&base, &config.channel_id, config.token.as_deref())?;

    let client = resockets::builder()
        .endpoint(endpoint.as_str())
        .reconnect_interval(Duration::from_millis(config.reconnect_interval_ms))
        .max_reconnect_attempts(config.max_reconnect_attempts)
        .build()?;

    client.on(EventKind::Open, |_| info!("channel socket open"));
    client.on(EventKind::Message, |event| {
        if let SocketEvent::Message(body) = event {
            match ServerFrame::from_value(body.clone()) {
                Ok(frame) => log_frame(&frame),
                Err(e) => warn!("unrecognized frame: {e}"),
            }
        }
    });
    client.on(EventKind::Close, |event| {
        if let SocketEvent::Close(info) = event {
            match info {
                Some(info) => info!("socket closed: code={} reason='{}'", info.code, info.reason),
                None => info!("socket closed"),
            }
        }
    });
    client.on(EventKind::Error, |event| {
        if let SocketEvent::Error(e) = event {
            warn!("socket error: {e}");
        }
    });

    client.connect();

    info!(
        "tapping channel '{}', press Ctrl+C to stop",
        config.channel_id
    );
    tokio::signal::ctrl_c().await?;

    client.close().await;
    info!("tap stopped");
    Ok(())
}

fn log_frame(frame: &ServerFrame) {
    match frame {
        ServerFrame::Message(msg) => {
            info!("[{}] {}: {}", msg.channel_id, msg.username, msg.content)
        }
        ServerFrame::DirectMessage(dm) => {
            info!("(dm) {} -> {}: {}", dm.username, dm.recipient_id, dm.content)
        }
        ServerFrame::Typing(t) if t.is_typing => info!("{} is typing...", t.username),
        ServerFrame::Typing(t) => info!("{} stopped typing", t.username),
        ServerFrame::UserJoined(p) => info!("{} joined {}", p.username, p.channel_id),
        ServerFrame::UserLeft(p) => info!("{} left {}", p.username, p.channel_id),
        ServerFrame::Error(e) => warn!("server error: {e}"),
    }
}
