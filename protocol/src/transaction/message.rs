//! Transfer messages.

use serde::{Deserialize, Serialize};

/// Message attached to a transfer.
///
/// Only plain messages are supported. The payload is written verbatim after
/// a one-byte type marker; an empty message still occupies that byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlainMessage {
    #[serde(with = "crate::crypto::hex_serde::vec")]
    payload: Vec<u8>,
}

impl PlainMessage {
    /// Marker byte of a plain message.
    pub const TYPE: u8 = 0x00;

    pub fn create(text: &str) -> Self {
        Self {
            payload: text.as_bytes().to_vec(),
        }
    }

    pub fn from_bytes(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn message_type(&self) -> u8 {
        Self::TYPE
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as text, when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Bytes the message occupies on the wire: type marker plus payload.
    pub fn encoded_len(&self) -> usize {
        1 + self.payload.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_still_has_marker() {
        let msg = PlainMessage::empty();
        assert!(msg.is_empty());
        assert_eq!(msg.encoded_len(), 1);
        assert_eq!(msg.message_type(), 0);
    }

    #[test]
    fn text_roundtrip() {
        let msg = PlainMessage::create("test-message");
        assert_eq!(msg.payload(), b"test-message");
        assert_eq!(msg.as_str(), Some("test-message"));
        assert_eq!(msg.encoded_len(), 13);
        assert_eq!(PlainMessage::from_bytes(vec![0xff]).as_str(), None);
    }
}
