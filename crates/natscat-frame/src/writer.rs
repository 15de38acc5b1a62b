use std::io::Write;

use bytes::BytesMut;

use crate::codec::{encode_record, Framing};
use crate::error::Result;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes delivered payloads to any `Write` stream.
///
/// Every payload is written and flushed before the call returns, so
/// output order follows call order and nothing lingers in a buffer.
pub struct PayloadWriter<W> {
    inner: W,
    buf: BytesMut,
    framing: Framing,
    written: u64,
}

impl<W: Write> PayloadWriter<W> {
    pub fn new(inner: W, framing: Framing) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            framing,
            written: 0,
        }
    }

    /// Write one payload with this writer's framing.
    pub fn write_payload(&mut self, payload: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_record(self.framing, payload, &mut self.buf);
        self.inner.write_all(&self.buf)?;
        self.inner.flush()?;
        self.written = self.written.saturating_add(1);
        Ok(())
    }

    /// Number of payloads written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::error::FrameError;

    #[test]
    fn raw_payloads_are_concatenated_verbatim() {
        let mut writer = PayloadWriter::new(Vec::new(), Framing::Raw);
        writer.write_payload(b"ab").unwrap();
        writer.write_payload(b"\ncd").unwrap();
        assert_eq!(writer.written(), 2);
        assert_eq!(writer.into_inner(), b"ab\ncd");
    }

    #[test]
    fn line_payloads_get_one_terminator_each() {
        let mut writer = PayloadWriter::new(Vec::new(), Framing::Lines);
        writer.write_payload(b"first").unwrap();
        writer.write_payload(b"").unwrap();
        writer.write_payload(b"has\nnewline").unwrap();
        assert_eq!(writer.get_ref().as_slice(), b"first\n\nhas\nnewline\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported() {
        let mut writer = PayloadWriter::new(BrokenPipe, Framing::Raw);
        let err = writer.write_payload(b"x").expect_err("write should fail");
        assert!(matches!(err, FrameError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(writer.written(), 0);
    }
}
