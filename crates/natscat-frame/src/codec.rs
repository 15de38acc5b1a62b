use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use tokio_util::codec::Decoder;

use crate::error::{FrameError, Result};

/// Default maximum record size: 16 MiB.
pub const DEFAULT_MAX_RECORD: usize = 16 * 1024 * 1024;

/// How terminal bytes map onto bus messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Framing {
    /// The whole stream is a single message; delivered payloads are written
    /// back with nothing added.
    Raw,
    /// Each line is a message; delivered payloads are written back followed
    /// by a line feed.
    Lines,
}

impl Framing {
    /// Map the CLI `--buffered` switch onto a framing.
    pub fn from_buffered(buffered: bool) -> Self {
        if buffered {
            Self::Lines
        } else {
            Self::Raw
        }
    }

    pub fn is_buffered(self) -> bool {
        self == Self::Lines
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => f.write_str("raw"),
            Self::Lines => f.write_str("lines"),
        }
    }
}

/// Configuration for reading and writing records.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum record size in bytes. Default: 16 MiB.
    pub max_record_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_record_size: DEFAULT_MAX_RECORD,
        }
    }
}

/// Splits a byte stream into line-feed terminated records.
///
/// Terminators are stripped, along with a carriage return right before
/// them. A final line without a terminator is still yielded at end of
/// stream; an empty tail is not.
#[derive(Debug, Clone)]
pub struct LineCodec {
    max_length: usize,
    // Offset already scanned for a terminator in the current buffer.
    next_index: usize,
}

impl LineCodec {
    pub fn new() -> Self {
        Self::with_max_length(DEFAULT_MAX_RECORD)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = Bytes;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>> {
        let start = self.next_index.min(src.len());
        if let Some(offset) = src[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            self.next_index = 0;
            if end > self.max_length {
                return Err(FrameError::RecordTooLarge {
                    size: end,
                    max: self.max_length,
                });
            }
            let mut line = src.split_to(end + 1);
            line.truncate(end);
            return Ok(Some(drop_cr(line.freeze())));
        }

        if src.len() > self.max_length {
            return Err(FrameError::RecordTooLarge {
                size: src.len(),
                max: self.max_length,
            });
        }
        self.next_index = src.len();
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        self.next_index = 0;
        if src.is_empty() {
            return Ok(None);
        }
        Ok(Some(drop_cr(src.split().freeze())))
    }
}

fn drop_cr(mut line: Bytes) -> Bytes {
    if line.last() == Some(&b'\r') {
        line.truncate(line.len() - 1);
    }
    line
}

/// Encode a delivered payload for the terminal side.
///
/// Raw framing copies the payload as is; line framing appends a single
/// line feed.
pub fn encode_record(framing: Framing, payload: &[u8], dst: &mut BytesMut) {
    let extra = usize::from(framing.is_buffered());
    dst.reserve(payload.len() + extra);
    dst.put_slice(payload);
    if framing.is_buffered() {
        dst.put_u8(b'\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(input: &[u8]) -> Vec<Bytes> {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(input);
        let mut out = Vec::new();
        while let Some(line) = codec.decode_eof(&mut buf).unwrap() {
            out.push(line);
        }
        out
    }

    #[test]
    fn test_splits_terminated_lines() {
        let lines = decode_all(b"a\nb\nc\n");
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_keeps_unterminated_tail() {
        let lines = decode_all(b"first\nsecond");
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_lines_are_records() {
        let lines = decode_all(b"\n\nx\n");
        assert_eq!(lines, vec!["", "", "x"]);
    }

    #[test]
    fn test_strips_carriage_return() {
        let lines = decode_all(b"dos\r\nline\r");
        assert_eq!(lines, vec!["dos", "line"]);
    }

    #[test]
    fn test_empty_input_has_no_records() {
        assert!(decode_all(b"").is_empty());
    }

    #[test]
    fn test_partial_line_waits_for_more_data() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"hel"[..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"lo\nrest");
        let line = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(line.as_ref(), b"hello");
        assert_eq!(buf.as_ref(), b"rest");
    }

    #[test]
    fn test_line_too_long() {
        let mut codec = LineCodec::with_max_length(4);
        let mut buf = BytesMut::from(&b"abcdefgh"[..]);
        let result = codec.decode(&mut buf);
        assert!(matches!(
            result,
            Err(FrameError::RecordTooLarge { size: 8, max: 4 })
        ));
    }

    #[test]
    fn test_encode_raw_record_is_verbatim() {
        let mut buf = BytesMut::new();
        encode_record(Framing::Raw, b"\x00bin\nary", &mut buf);
        assert_eq!(buf.as_ref(), b"\x00bin\nary");
    }

    #[test]
    fn test_encode_line_record_appends_one_newline() {
        let mut buf = BytesMut::new();
        encode_record(Framing::Lines, b"hello", &mut buf);
        assert_eq!(buf.as_ref(), b"hello\n");
    }

    #[test]
    fn test_framing_from_buffered_flag() {
        assert_eq!(Framing::from_buffered(true), Framing::Lines);
        assert_eq!(Framing::from_buffered(false), Framing::Raw);
        assert_eq!(Framing::Lines.to_string(), "lines");
    }
}
