#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use sched_telemetry::InboundMessage;
use telemetry_channel::{ChannelError, ChannelHandle, ChannelId, Connector};

#[derive(Default)]
pub struct ChannelTrace {
    pub opens: Vec<(String, ChannelId)>,
    pub transmits: Vec<(ChannelId, String)>,
    pub closes: Vec<ChannelId>,
    pub refuse_open: bool,
    pub fail_transmit: bool,
}

pub struct FakeConnector {
    state: Arc<Mutex<ChannelTrace>>,
}

impl FakeConnector {
    pub fn new() -> (Self, Arc<Mutex<ChannelTrace>>) {
        let state = Arc::new(Mutex::new(ChannelTrace::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl Connector for FakeConnector {
    type Handle = FakeHandle;

    fn open(&mut self, endpoint: &str, channel: ChannelId) -> Result<FakeHandle, ChannelError> {
        let mut state = lock_unpoisoned(&self.state);
        if state.refuse_open {
            return Err(ChannelError::Connect {
                url: endpoint.to_string(),
                message: "refused by fake".to_string(),
            });
        }
        state.opens.push((endpoint.to_string(), channel));
        Ok(FakeHandle {
            channel,
            state: Arc::clone(&self.state),
        })
    }
}

pub struct FakeHandle {
    channel: ChannelId,
    state: Arc<Mutex<ChannelTrace>>,
}

impl ChannelHandle for FakeHandle {
    fn transmit(&mut self, text: String) -> Result<(), ChannelError> {
        let mut state = lock_unpoisoned(&self.state);
        if state.fail_transmit {
            return Err(ChannelError::Transport("fake transmit failure".to_string()));
        }
        state.transmits.push((self.channel, text));
        Ok(())
    }

    fn close(&mut self) {
        lock_unpoisoned(&self.state).closes.push(self.channel);
    }
}

/// Collects dispatched messages.
#[derive(Default)]
pub struct Inbox {
    pub messages: Vec<InboundMessage>,
}

impl sched_telemetry::MessageHandler for Inbox {
    fn on_message(&mut self, message: InboundMessage) {
        self.messages.push(message);
    }
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
