//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while building or parsing wire payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Handle exceeds the maximum handle length.
    #[error("handle too long: {len} characters (max {max})")]
    HandleTooLong {
        /// Length of the rejected handle, in characters
        len: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Message text exceeds the maximum message length.
    #[error("message too long: {len} characters (max {max})")]
    MessageTooLong {
        /// Length of the rejected text, in characters
        len: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Received payload is larger than any valid frame.
    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge {
        /// Size of the payload in bytes
        size: usize,
        /// Maximum payload size in bytes
        max: usize,
    },

    /// Handle or text contains a line ending.
    ///
    /// Line endings are stripped at the console, so this indicates a caller
    /// bypassed bounded input.
    #[error("{field} contains a line ending")]
    LineEnding {
        /// Which part of the message was rejected
        field: &'static str,
    },
}
