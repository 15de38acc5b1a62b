//! Publish/subscribe bus abstraction for natscat.
//!
//! Provides a small interface over the messaging client:
//! - [`Bus`] — publish, subscribe and flush on a live connection
//! - [`NatsBus`] — the NATS implementation on top of `async-nats`
//!
//! This is the lowest layer of natscat. The CLI only talks to the bus
//! through the [`Bus`] trait, so tests can swap in a recording bus.

pub mod error;
pub mod nats;
pub mod subject;
pub mod traits;

pub use error::{BusError, Result};
pub use nats::{ConnectConfig, NatsBus, DEFAULT_CLIENT_NAME, DEFAULT_CONNECT_TIMEOUT, DEFAULT_URL};
pub use subject::{has_wildcard, WILDCARDS};
pub use traits::{Bus, Message, MessageStream};
