use bytes::Bytes;
use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::codec::FramedRead;
use tracing::trace;

use crate::codec::{FrameConfig, Framing, LineCodec};
use crate::error::{FrameError, Result};

/// Reads publishable records from any `AsyncRead` stream.
///
/// With line framing every line becomes a record. With raw framing the
/// stream is read to the end and yielded as exactly one record, which may
/// be empty.
pub struct PayloadReader<R> {
    inner: ReaderInner<R>,
}

enum ReaderInner<R> {
    Lines(FramedRead<R, LineCodec>),
    Raw { stream: Option<R>, max: usize },
}

impl<R: AsyncRead + Unpin> PayloadReader<R> {
    /// Create a new reader with default configuration.
    pub fn new(inner: R, framing: Framing) -> Self {
        Self::with_config(inner, framing, FrameConfig::default())
    }

    /// Create a new reader with explicit configuration.
    pub fn with_config(inner: R, framing: Framing, config: FrameConfig) -> Self {
        let inner = match framing {
            Framing::Lines => ReaderInner::Lines(FramedRead::new(
                inner,
                LineCodec::with_max_length(config.max_record_size),
            )),
            Framing::Raw => ReaderInner::Raw {
                stream: Some(inner),
                max: config.max_record_size,
            },
        };
        Self { inner }
    }

    pub fn framing(&self) -> Framing {
        match self.inner {
            ReaderInner::Lines(_) => Framing::Lines,
            ReaderInner::Raw { .. } => Framing::Raw,
        }
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub async fn next_record(&mut self) -> Result<Option<Bytes>> {
        match &mut self.inner {
            ReaderInner::Lines(framed) => framed.next().await.transpose(),
            ReaderInner::Raw { stream, max } => {
                let Some(stream) = stream.take() else {
                    return Ok(None);
                };

                let mut buf = Vec::new();
                let limit = u64::try_from(*max).unwrap_or(u64::MAX).saturating_add(1);
                stream.take(limit).read_to_end(&mut buf).await?;
                if buf.len() > *max {
                    return Err(FrameError::RecordTooLarge {
                        size: buf.len(),
                        max: *max,
                    });
                }

                trace!(bytes = buf.len(), "read raw input");
                Ok(Some(Bytes::from(buf)))
            }
        }
    }
}
