//! Sender handle.

use std::fmt;

use crate::{
    errors::{ProtocolError, Result},
    limits::MAX_HANDLE_LEN,
    text,
};

/// A user's display handle, prefixed to every message they send.
///
/// # Invariants
///
/// - At most [`MAX_HANDLE_LEN`] characters.
/// - Never contains `\r` or `\n`.
///
/// An empty handle is valid; the wire form is then `> text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Handle(String);

impl Handle {
    /// Validate `name` as a handle.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::LineEnding` if `name` contains `\r` or `\n`
    /// - `ProtocolError::HandleTooLong` if `name` exceeds [`MAX_HANDLE_LEN`]
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.contains(['\r', '\n']) {
            return Err(ProtocolError::LineEnding { field: "handle" });
        }

        let len = name.chars().count();
        if len > MAX_HANDLE_LEN {
            return Err(ProtocolError::HandleTooLong { len, max: MAX_HANDLE_LEN });
        }

        Ok(Self(name))
    }

    /// Build a handle from raw console input, never failing.
    ///
    /// Cuts at the first line ending, then keeps at most `max` characters.
    /// `max` is clamped to [`MAX_HANDLE_LEN`].
    pub fn truncated(raw: &str, max: usize) -> Self {
        let line = text::strip_line_ending(raw);
        Self(text::truncate_chars(line, max.min(MAX_HANDLE_LEN)).to_owned())
    }

    /// The handle as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the handle is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
