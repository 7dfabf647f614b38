//! Owned connection lifecycle for the simulation channel.
//!
//! [`ConnectionManager`] drives a `Disconnected -> Connecting -> Open` state
//! machine over a [`Connector`]. Transport callbacks come back as
//! [`ChannelEvent`]s tagged with the [`ChannelId`] that produced them, so
//! events from a replaced or closed channel are ignored.

use sched_telemetry::MessageHandler;
use tracing::{debug, info, warn};

use crate::config::ChannelConfig;
use crate::error::ChannelError;
use crate::events::parse_inbound;
use crate::payload::ConnectionRequest;
use crate::url::normalize_ws_url;

/// Generation number of one dialed channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEventKind {
    Opened,
    Message(String),
    Failed(String),
    Closed,
}

/// Transport notification delivered back to [`ConnectionManager::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEvent {
    pub channel: ChannelId,
    pub kind: ChannelEventKind,
}

impl ChannelEvent {
    pub fn new(channel: ChannelId, kind: ChannelEventKind) -> Self {
        Self { channel, kind }
    }
}

/// Sending half of one dialed channel.
pub trait ChannelHandle {
    fn transmit(&mut self, text: String) -> Result<(), ChannelError>;
    fn close(&mut self);
}

/// Dials channels. `open` must not block on the handshake; completion is
/// reported later as [`ChannelEventKind::Opened`] or
/// [`ChannelEventKind::Failed`].
pub trait Connector {
    type Handle: ChannelHandle;

    fn open(&mut self, endpoint: &str, channel: ChannelId) -> Result<Self::Handle, ChannelError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Closed,
}

pub struct ConnectionManager<C: Connector, H: MessageHandler> {
    connector: C,
    handler: H,
    endpoint: String,
    state: ConnectionState,
    active: Option<(ChannelId, C::Handle)>,
    pending: Option<ConnectionRequest>,
    next_channel: u64,
}

impl<C: Connector, H: MessageHandler> ConnectionManager<C, H> {
    pub fn new(connector: C, handler: H, config: &ChannelConfig) -> Self {
        Self {
            connector,
            handler,
            endpoint: normalize_ws_url(&config.endpoint),
            state: ConnectionState::Disconnected,
            active: None,
            pending: None,
            next_channel: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn active_channel(&self) -> Option<ChannelId> {
        self.active.as_ref().map(|(channel, _)| *channel)
    }

    pub fn pending(&self) -> Option<&ConnectionRequest> {
        self.pending.as_ref()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Starts dialing unless a channel is already connecting or open.
    pub fn connect(&mut self) -> Result<(), ChannelError> {
        if matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Open
        ) {
            return Ok(());
        }

        self.next_channel += 1;
        let channel = ChannelId(self.next_channel);
        self.state = ConnectionState::Connecting;
        debug!(channel = channel.0, endpoint = %self.endpoint, "dialing channel");

        match self.connector.open(&self.endpoint, channel) {
            Ok(handle) => {
                self.active = Some((channel, handle));
                Ok(())
            }
            Err(error) => {
                warn!(channel = channel.0, %error, "channel dial failed");
                self.state = ConnectionState::Disconnected;
                Err(error)
            }
        }
    }

    /// Transmits now when open; otherwise buffers (last write wins) and dials.
    ///
    /// Only an invalid request is reported. Transport trouble is logged and
    /// leaves the request buffered for the next open channel.
    pub fn send(&mut self, request: ConnectionRequest) -> Result<(), ChannelError> {
        request.validate()?;

        if self.state == ConnectionState::Open {
            let text = request.to_json()?;
            match self.transmit(text) {
                Ok(()) => return Ok(()),
                Err(error) => {
                    warn!(%error, "transmit failed on open channel; redialing");
                    self.teardown(ConnectionState::Disconnected);
                }
            }
        }

        if self.pending.replace(request).is_some() {
            debug!("replaced buffered request");
        }
        if matches!(
            self.state,
            ConnectionState::Disconnected | ConnectionState::Closed
        ) {
            // Dial errors are already logged; the request stays buffered.
            let _ = self.connect();
        }
        Ok(())
    }

    /// Applies one transport notification. Events from any channel other than
    /// the active one are ignored.
    pub fn handle_event(&mut self, event: ChannelEvent) {
        if self.active_channel() != Some(event.channel) {
            debug!(channel = event.channel.0, "ignoring event from stale channel");
            return;
        }

        match event.kind {
            ChannelEventKind::Opened => {
                if self.state != ConnectionState::Connecting {
                    return;
                }
                self.state = ConnectionState::Open;
                info!(channel = event.channel.0, endpoint = %self.endpoint, "channel open");
                self.flush_pending();
            }
            ChannelEventKind::Message(text) => match parse_inbound(&text) {
                Ok(message) => self.handler.on_message(message),
                Err(error) => warn!(%error, "dropping malformed inbound payload"),
            },
            ChannelEventKind::Failed(reason) => {
                warn!(channel = event.channel.0, %reason, "channel failed");
                self.teardown(ConnectionState::Disconnected);
            }
            ChannelEventKind::Closed => {
                info!(channel = event.channel.0, "channel closed by remote");
                self.teardown(ConnectionState::Disconnected);
            }
        }
    }

    /// Closes the active channel, if any. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.active.is_some() {
            info!(endpoint = %self.endpoint, "closing channel");
        }
        self.pending = None;
        self.teardown(ConnectionState::Closed);
    }

    fn transmit(&mut self, text: String) -> Result<(), ChannelError> {
        match self.active.as_mut() {
            Some((_, handle)) => handle.transmit(text),
            None => Err(ChannelError::NotOpen),
        }
    }

    fn flush_pending(&mut self) {
        let Some(request) = self.pending.take() else {
            return;
        };
        let text = match request.to_json() {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, "dropping unencodable buffered request");
                return;
            }
        };
        if let Err(error) = self.transmit(text) {
            warn!(%error, "flush failed; keeping request buffered");
            self.pending = Some(request);
            self.teardown(ConnectionState::Disconnected);
        }
    }

    fn teardown(&mut self, next: ConnectionState) {
        if let Some((_, mut handle)) = self.active.take() {
            handle.close();
        }
        self.state = next;
    }
}

impl<C: Connector, H: MessageHandler> Drop for ConnectionManager<C, H> {
    fn drop(&mut self) {
        self.close();
    }
}
