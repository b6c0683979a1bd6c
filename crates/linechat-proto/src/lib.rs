//! Line chat wire protocol.
//!
//! A chat message travels as plain text of the form `handle> text`, one
//! message per transport write and one per transport read. There is no
//! length prefix and no terminator: the paired server relies on the
//! strictly alternating, half-duplex exchange to keep call boundaries and
//! message boundaries aligned.
//!
//! # Components
//!
//! - [`limits`]: Handle, message and frame size bounds
//! - [`Handle`]: A validated sender handle
//! - [`ChatFrame`]: A decoded payload split into sender and text
//! - [`encode_message`]: Builds the outgoing wire payload
//! - [`text`]: Line-ending and character truncation helpers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod frame;
mod handle;
pub mod limits;
pub mod text;

pub use errors::{ProtocolError, Result};
pub use frame::{ChatFrame, encode_message};
pub use handle::Handle;
pub use limits::{MAX_FRAME_LEN, MAX_HANDLE_LEN, MAX_MESSAGE_LEN, QUIT_COMMAND, SEPARATOR};
