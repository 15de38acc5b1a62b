use std::future::Future;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::Result;

/// A message delivered by (or handed to) the bus.
///
/// The payload is opaque; natscat imposes no structure on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The concrete subject the message was published on.
    pub subject: String,
    /// The message body.
    pub payload: Bytes,
}

impl Message {
    /// Create a new message.
    pub fn new(subject: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
        }
    }
}

/// Deliveries for one subscription, in dispatch order.
///
/// The stream ends when the bus closes the subscription.
pub type MessageStream = BoxStream<'static, Message>;

/// A live connection to a publish/subscribe bus.
///
/// The connection is released when the implementor is dropped.
pub trait Bus {
    /// Publish a single message on `subject`.
    fn publish(&self, subject: &str, payload: Bytes) -> impl Future<Output = Result<()>> + Send;

    /// Register interest in a subject pattern. Wildcards are passed through
    /// to the bus untouched.
    fn subscribe(&self, subject: &str) -> impl Future<Output = Result<MessageStream>> + Send;

    /// Push any buffered publishes to the server and surface a pending
    /// transport error, if one was recorded.
    fn flush(&self) -> impl Future<Output = Result<()>> + Send;
}
