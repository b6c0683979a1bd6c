//! Session configuration.

use linechat_proto::{MAX_HANDLE_LEN, MAX_MESSAGE_LEN};

/// Default handle length limit, in characters.
pub const DEFAULT_MAX_HANDLE_LEN: usize = MAX_HANDLE_LEN;

/// Default message length limit, in characters.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = MAX_MESSAGE_LEN;

/// Input limits applied at the console.
///
/// Limits are enforced where input is read, so nothing over the limit ever
/// reaches the framer. Values above the protocol limits are clamped to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum handle length, in characters
    pub max_handle_len: usize,
    /// Maximum message length, in characters
    pub max_message_len: usize,
}

impl SessionConfig {
    /// Handle limit after clamping to the protocol limit.
    pub fn handle_limit(&self) -> usize {
        self.max_handle_len.min(MAX_HANDLE_LEN)
    }

    /// Message limit after clamping to the protocol limit.
    pub fn message_limit(&self) -> usize {
        self.max_message_len.min(MAX_MESSAGE_LEN)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_handle_len: DEFAULT_MAX_HANDLE_LEN, max_message_len: DEFAULT_MAX_MESSAGE_LEN }
    }
}
