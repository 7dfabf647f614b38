#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use telemetry_channel::{
    ChannelError, ChannelEvent, ChannelEventKind, ChannelHandle, ChannelId, Connector,
};

#[derive(Default)]
pub struct ChannelTrace {
    pub opens: Vec<ChannelId>,
    pub transmits: Vec<String>,
    pub closes: Vec<ChannelId>,
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

    fn open(&mut self, _endpoint: &str, channel: ChannelId) -> Result<FakeHandle, ChannelError> {
        lock_unpoisoned(&self.state).opens.push(channel);
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
        lock_unpoisoned(&self.state).transmits.push(text);
        Ok(())
    }

    fn close(&mut self) {
        lock_unpoisoned(&self.state).closes.push(self.channel);
    }
}

pub fn opened(channel: u64) -> ChannelEvent {
    ChannelEvent::new(ChannelId(channel), ChannelEventKind::Opened)
}

pub fn frame(channel: u64, text: &str) -> ChannelEvent {
    ChannelEvent::new(ChannelId(channel), ChannelEventKind::Message(text.to_string()))
}

pub fn closed(channel: u64) -> ChannelEvent {
    ChannelEvent::new(ChannelId(channel), ChannelEventKind::Closed)
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
