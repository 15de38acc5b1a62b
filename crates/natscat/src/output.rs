use std::borrow::Cow;

/// Printable form of a payload for diagnostics on stderr.
///
/// Text is shown as is; binary payloads are summarised by size.
pub fn payload_preview(payload: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(payload) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(format!("<binary {} bytes>", payload.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_payload_is_shown_verbatim() {
        assert_eq!(payload_preview(b"hello"), "hello");
    }

    #[test]
    fn binary_payload_is_summarised() {
        assert_eq!(payload_preview(&[0xff, 0xfe, 0x00]), "<binary 3 bytes>");
    }
}
