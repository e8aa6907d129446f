//! Flash Message Sinks

use crate::messages::FlashMessage;

/// Destination for flash messages raised during a request.
///
/// Web frontends implement this against their framework's message store;
/// [`FlashQueue`] is the bundled request-scoped in-memory implementation.
pub trait FlashSink {
    /// Add a message to the sink.
    fn enqueue(&mut self, message: FlashMessage);
}

/// Request-scoped in-memory flash message queue.
#[derive(Debug, Clone, Default)]
pub struct FlashQueue {
    messages: Vec<FlashMessage>,
}

impl FlashQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// The queued messages, oldest first.
    pub fn messages(&self) -> &[FlashMessage] {
        &self.messages
    }

    /// Remove and return every queued message, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = FlashMessage> + '_ {
        self.messages.drain(..)
    }

    /// Get the number of queued messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl FlashSink for FlashQueue {
    fn enqueue(&mut self, message: FlashMessage) {
        self.messages.push(message);
    }
}
