//! Framing between terminal byte streams and discrete bus messages.
//!
//! Two framings are supported:
//! - [`Framing::Lines`] — one record per line-feed terminated line; the
//!   terminator (and a preceding carriage return) is not part of the record
//! - [`Framing::Raw`] — the whole stream is one record, byte for byte
//!
//! [`PayloadReader`] turns an input stream into records, [`PayloadWriter`]
//! writes delivered payloads back out with the matching framing.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{encode_record, FrameConfig, Framing, LineCodec, DEFAULT_MAX_RECORD};
pub use error::{FrameError, Result};
pub use reader::PayloadReader;
pub use writer::PayloadWriter;
