use crate::core::model::InboundMessage;

/// Sink for parsed inbound channel messages.
///
/// A connection delivers every successfully parsed message to exactly one handler,
/// serially, on the caller's task.
pub trait MessageHandler {
    fn on_message(&mut self, message: InboundMessage);
}

impl<F> MessageHandler for F
where
    F: FnMut(InboundMessage),
{
    fn on_message(&mut self, message: InboundMessage) {
        self(message)
    }
}
