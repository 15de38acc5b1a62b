//! cat to and from a NATS subject.
//!
//! natscat publishes stdin (or a literal message) to a subject, or
//! subscribes to a subject pattern and writes every delivered payload to
//! stdout.
//!
//! # Crate Structure
//!
//! - [`bus`] — Bus abstraction and the NATS connection
//! - [`frame`] — Line and raw-byte framing of terminal streams

/// Re-export bus types.
pub mod bus {
    pub use natscat_bus::*;
}

/// Re-export frame types.
pub mod frame {
    pub use natscat_frame::*;
}
