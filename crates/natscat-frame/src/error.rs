/// Errors that can occur while framing terminal input or output.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A record exceeds the configured maximum size.
    #[error("record too large ({size} bytes, max {max})")]
    RecordTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing records.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
