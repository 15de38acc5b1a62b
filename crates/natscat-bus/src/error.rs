use std::time::Duration;

/// Errors that can occur in bus operations.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// No server address was configured.
    #[error("no server address configured")]
    NoServers,

    /// A server address could not be parsed.
    #[error("invalid server address {addr:?}: {source}")]
    InvalidAddress {
        addr: String,
        source: std::io::Error,
    },

    /// Failed to connect to any of the configured servers.
    #[error("failed to connect to {servers}: {reason}")]
    Connect { servers: String, reason: String },

    /// The connect attempt did not complete in time.
    #[error("connect to {servers} timed out after {timeout:?}")]
    ConnectTimeout { servers: String, timeout: Duration },

    /// The server rejected our credentials or permissions.
    #[error("authorization violation: {0}")]
    Authorization(String),

    /// A publish call was rejected by the client.
    #[error("publish to {subject} failed: {reason}")]
    Publish { subject: String, reason: String },

    /// A subscription could not be registered.
    #[error("subscribe to {subject} failed: {reason}")]
    Subscribe { subject: String, reason: String },

    /// Buffered publishes could not be flushed to the server.
    #[error("flush failed: {0}")]
    Flush(String),
}

pub type Result<T> = std::result::Result<T, BusError>;
