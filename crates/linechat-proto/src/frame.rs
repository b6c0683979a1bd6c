//! Framed chat messages.
//!
//! A framed message is `handle + "> " + text` sent as one transport write.
//! The receiving side treats whatever a single read returns as one message.
//! TCP itself gives no such guarantee; the convention holds because each side
//! waits for the other's reply before writing again and frames are small.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    Handle,
    errors::{ProtocolError, Result},
    limits::{MAX_FRAME_BYTES, MAX_HANDLE_LEN, MAX_MESSAGE_LEN, SEPARATOR},
};

/// Build the wire payload for `text` sent by `handle`.
///
/// # Errors
///
/// - `ProtocolError::MessageTooLong` if `text` exceeds [`MAX_MESSAGE_LEN`]
/// - `ProtocolError::LineEnding` if `text` contains `\r` or `\n`
pub fn encode_message(handle: &Handle, text: &str) -> Result<Bytes> {
    if text.contains(['\r', '\n']) {
        return Err(ProtocolError::LineEnding { field: "message" });
    }

    let len = text.chars().count();
    if len > MAX_MESSAGE_LEN {
        return Err(ProtocolError::MessageTooLong { len, max: MAX_MESSAGE_LEN });
    }

    let mut buf =
        BytesMut::with_capacity(handle.as_str().len() + SEPARATOR.len() + text.len());
    buf.put_slice(handle.as_str().as_bytes());
    buf.put_slice(SEPARATOR.as_bytes());
    buf.put_slice(text.as_bytes());

    debug_assert!(buf.len() <= MAX_FRAME_BYTES);

    Ok(buf.freeze())
}

/// A received payload split into sender and text.
///
/// Decoding never rejects content: the paired server is trusted, and
/// anything it sends is shown to the user. Bytes that are not valid UTF-8
/// are replaced, and a payload without a recognizable `handle> ` prefix is
/// kept whole with no sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatFrame {
    /// Handle of the sender, if the payload carried one
    pub sender: Option<String>,
    /// Message text
    pub text: String,
}

impl ChatFrame {
    /// Decode a payload returned by a single receive.
    ///
    /// The payload ends at the first NUL byte, as the receive buffer is
    /// zeroed before every read. Trailing line endings are dropped so display
    /// adds exactly one.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameTooLarge` if `bytes` is longer than any frame
    ///   the receive buffer is sized for
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_FRAME_BYTES {
            return Err(ProtocolError::FrameTooLarge { size: bytes.len(), max: MAX_FRAME_BYTES });
        }

        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let decoded = String::from_utf8_lossy(&bytes[..end]);
        let payload = decoded.trim_end_matches(['\r', '\n']);

        let frame = match payload.split_once(SEPARATOR) {
            Some((sender, text)) if sender.chars().count() <= MAX_HANDLE_LEN => {
                Self { sender: Some(sender.to_owned()), text: text.to_owned() }
            },
            _ => Self { sender: None, text: payload.to_owned() },
        };

        Ok(frame)
    }
}

impl fmt::Display for ChatFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sender {
            Some(sender) => write!(f, "{sender}{SEPARATOR}{}", self.text),
            None => f.write_str(&self.text),
        }
    }
}
