//! Size bounds shared by both ends of a chat.
//!
//! Lengths are counted in characters (Unicode scalar values), matching what
//! a user sees at the prompt. Byte capacities are derived from character
//! bounds through [`MAX_UTF8_WIDTH`].

/// Maximum handle length, in characters.
pub const MAX_HANDLE_LEN: usize = 10;

/// Maximum message text length, in characters.
pub const MAX_MESSAGE_LEN: usize = 500;

/// Literal placed between the handle and the text.
pub const SEPARATOR: &str = "> ";

/// Maximum framed message length, in characters.
pub const MAX_FRAME_LEN: usize = MAX_HANDLE_LEN + MAX_MESSAGE_LEN + SEPARATOR.len();

/// Widest UTF-8 encoding of a single character.
pub const MAX_UTF8_WIDTH: usize = 4;

/// Largest payload a single receive must hold, in bytes.
///
/// Sized so that a maximal frame of any characters fits one read. The
/// receive buffer is allocated at exactly this size and each read requests
/// exactly this many bytes.
pub const MAX_FRAME_BYTES: usize = MAX_FRAME_LEN * MAX_UTF8_WIDTH;

/// Input that ends the session instead of being sent.
pub const QUIT_COMMAND: &str = "\\quit";
