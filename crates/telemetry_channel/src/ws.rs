//! WebSocket transport for [`ConnectionManager`](crate::ConnectionManager).
//!
//! Each dialed channel runs as one task on the supplied tokio runtime. The task
//! reports back through a shared unbounded queue; the caller drains it and feeds
//! every [`ChannelEvent`] to the manager.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::config::ChannelConfig;
use crate::connection::{ChannelEvent, ChannelEventKind, ChannelHandle, ChannelId, Connector};
use crate::error::ChannelError;
use crate::retry::{is_retryable_connect_error, retry_delay};
use crate::url::is_websocket_url;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug)]
enum Outbound {
    Text(String),
    Close,
}

#[derive(Debug, Clone, Copy)]
struct DialSettings {
    timeout: Option<Duration>,
    retries: u32,
}

pub struct WsConnector {
    runtime: Handle,
    events: UnboundedSender<ChannelEvent>,
    dial: DialSettings,
}

impl WsConnector {
    /// Returns the connector and the queue its channels report into.
    pub fn new(config: &ChannelConfig, runtime: Handle) -> (Self, UnboundedReceiver<ChannelEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let connector = Self {
            runtime,
            events,
            dial: DialSettings {
                timeout: config.connect_timeout,
                retries: config.connect_retries,
            },
        };
        (connector, receiver)
    }
}

impl Connector for WsConnector {
    type Handle = WsHandle;

    fn open(&mut self, endpoint: &str, channel: ChannelId) -> Result<WsHandle, ChannelError> {
        if !is_websocket_url(endpoint) {
            return Err(ChannelError::InvalidUrl(endpoint.to_string()));
        }

        let (outbound, commands) = mpsc::unbounded_channel();
        self.runtime.spawn(run_channel(
            endpoint.to_string(),
            channel,
            self.dial,
            commands,
            self.events.clone(),
        ));
        Ok(WsHandle {
            outbound,
            closed: false,
        })
    }
}

pub struct WsHandle {
    outbound: UnboundedSender<Outbound>,
    closed: bool,
}

impl ChannelHandle for WsHandle {
    fn transmit(&mut self, text: String) -> Result<(), ChannelError> {
        if self.closed {
            return Err(ChannelError::NotOpen);
        }
        self.outbound
            .send(Outbound::Text(text))
            .map_err(|_| ChannelError::Transport("channel task has exited".to_string()))
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = self.outbound.send(Outbound::Close);
    }
}

async fn run_channel(
    url: String,
    channel: ChannelId,
    dial: DialSettings,
    mut commands: UnboundedReceiver<Outbound>,
    events: UnboundedSender<ChannelEvent>,
) {
    let emit = |kind: ChannelEventKind| {
        let _ = events.send(ChannelEvent::new(channel, kind));
    };

    let socket = tokio::select! {
        result = dial_with_retry(&url, dial) => match result {
            Ok(socket) => socket,
            Err(error) => {
                emit(ChannelEventKind::Failed(error.to_string()));
                return;
            }
        },
        _ = wait_for_close(&mut commands) => {
            debug!(channel = channel.0, "channel closed before open");
            return;
        }
    };

    emit(ChannelEventKind::Opened);
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Outbound::Text(text)) => {
                    if let Err(error) = sink.send(Message::Text(text)).await {
                        emit(ChannelEventKind::Failed(error.to_string()));
                        return;
                    }
                }
                Some(Outbound::Close) | None => {
                    let _ = sink.send(Message::Close(None)).await;
                    let _ = sink.close().await;
                    return;
                }
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => emit(ChannelEventKind::Message(text)),
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                    Ok(text) => emit(ChannelEventKind::Message(text)),
                    Err(_) => warn!(channel = channel.0, "dropping non-UTF-8 binary frame"),
                },
                Some(Ok(Message::Close(_))) | None => {
                    emit(ChannelEventKind::Closed);
                    return;
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    emit(ChannelEventKind::Failed(error.to_string()));
                    return;
                }
            },
        }
    }
}

async fn wait_for_close(commands: &mut UnboundedReceiver<Outbound>) {
    loop {
        match commands.recv().await {
            Some(Outbound::Close) | None => return,
            Some(Outbound::Text(_)) => debug!("dropping frame queued before open"),
        }
    }
}

async fn dial_with_retry(url: &str, dial: DialSettings) -> Result<WsStream, ChannelError> {
    let mut attempt = 0;
    loop {
        let error = match dial_once(url, dial.timeout).await {
            Ok(socket) => return Ok(socket),
            Err(error) => error,
        };

        let retryable = match &error {
            ChannelError::ConnectTimeout { .. } => true,
            ChannelError::Connect { message, .. } => is_retryable_connect_error(message),
            _ => false,
        };
        if attempt >= dial.retries || !retryable {
            return Err(error);
        }

        let delay = retry_delay(attempt);
        warn!(%error, attempt, delay_ms = delay.as_millis() as u64, "retrying channel dial");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

async fn dial_once(url: &str, timeout: Option<Duration>) -> Result<WsStream, ChannelError> {
    let connect = connect_async(url);
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, connect)
            .await
            .map_err(|_| ChannelError::ConnectTimeout {
                url: url.to_string(),
            })?,
        None => connect.await,
    };
    result
        .map(|(socket, _response)| socket)
        .map_err(|error| ChannelError::Connect {
            url: url.to_string(),
            message: error.to_string(),
        })
}
