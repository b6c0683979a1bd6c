//! Bounded console input.
//!
//! Every console read goes through [`read_bounded_line`]. When a line is
//! longer than allowed, the rest of it is consumed and dropped so the next
//! read waits for new input instead of picking up the leftovers.

use std::io::{self, BufRead, Read};

use linechat_proto::{limits::MAX_UTF8_WIDTH, text};

/// One line read from the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// Line text, without line ending, at most the requested length
    pub text: String,
    /// Whether characters beyond the limit were discarded
    pub truncated: bool,
}

impl InputLine {
    /// A line that fit within its limit.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), truncated: false }
    }
}

/// Read one line of at most `max_chars` characters from `reader`.
///
/// Everything from the first `\r` or `\n` on is stripped. If the line holds
/// more than `max_chars` characters, only the first `max_chars` are kept and
/// the reader is drained through the next `\n`.
///
/// At most `max_chars * MAX_UTF8_WIDTH + 2` bytes are buffered regardless of
/// how long the line is. Returns `None` at end of input.
///
/// # Errors
///
/// Returns any I/O error from `reader`.
pub fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    max_chars: usize,
) -> io::Result<Option<InputLine>> {
    let byte_limit = (max_chars * MAX_UTF8_WIDTH + 2) as u64;

    let mut raw = Vec::new();
    let read = Read::by_ref(reader).take(byte_limit).read_until(b'\n', &mut raw)?;
    if read == 0 {
        return Ok(None);
    }

    let hit_limit = raw.last() != Some(&b'\n') && read as u64 == byte_limit;
    if hit_limit {
        let drained = reader.skip_until(b'\n')?;
        tracing::debug!(drained, "discarded overlong input");
    }

    let decoded = String::from_utf8_lossy(&raw);
    let line = text::strip_line_ending(&decoded);
    let kept = text::truncate_chars(line, max_chars);

    Ok(Some(InputLine { text: kept.to_owned(), truncated: hit_limit || kept.len() < line.len() }))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn read(input: &mut Cursor<&[u8]>, max: usize) -> Option<InputLine> {
        read_bounded_line(input, max).unwrap()
    }

    #[test]
    fn short_line_is_kept_verbatim() {
        let mut input = Cursor::new(&b"alexander\n"[..]);
        assert_eq!(read(&mut input, 10), Some(InputLine::new("alexander")));
    }

    #[test]
    fn line_at_limit_is_not_truncated() {
        let mut input = Cursor::new(&b"0123456789\nnext\n"[..]);
        assert_eq!(read(&mut input, 10), Some(InputLine::new("0123456789")));
        assert_eq!(read(&mut input, 10), Some(InputLine::new("next")));
    }

    #[test]
    fn overlong_line_is_truncated_and_drained() {
        let mut input = Cursor::new(&b"alexanderthegreat\nhello there\n"[..]);

        let name = read(&mut input, 10).unwrap();
        assert_eq!(name.text, "alexandert");
        assert!(name.truncated);

        // Next read sees only genuinely new input
        assert_eq!(read(&mut input, 500), Some(InputLine::new("hello there")));
    }

    #[test]
    fn very_long_line_is_drained_past_byte_limit() {
        let mut bytes = vec![b'x'; 5000];
        bytes.extend_from_slice(b"\nafter\n");
        let mut input = Cursor::new(&bytes[..]);

        let line = read(&mut input, 10).unwrap();
        assert_eq!(line.text, "xxxxxxxxxx");
        assert!(line.truncated);
        assert_eq!(read(&mut input, 10), Some(InputLine::new("after")));
    }

    #[test]
    fn crlf_is_stripped() {
        let mut input = Cursor::new(&b"hello\r\n"[..]);
        assert_eq!(read(&mut input, 500), Some(InputLine::new("hello")));
    }

    #[test]
    fn empty_line_is_empty_text() {
        let mut input = Cursor::new(&b"\n"[..]);
        assert_eq!(read(&mut input, 500), Some(InputLine::new("")));
    }

    #[test]
    fn end_of_input_is_none() {
        let mut input = Cursor::new(&b""[..]);
        assert_eq!(read(&mut input, 500), None);
    }

    #[test]
    fn last_line_without_newline_is_returned() {
        let mut input = Cursor::new(&b"bye"[..]);
        assert_eq!(read(&mut input, 500), Some(InputLine::new("bye")));
        assert_eq!(read(&mut input, 500), None);
    }

    #[test]
    fn multibyte_characters_count_once() {
        let mut input = Cursor::new("ééééééééééééé\nok\n".as_bytes());
        let line = read(&mut input, 10).unwrap();
        assert_eq!(line.text, "éééééééééé");
        assert!(line.truncated);
        assert_eq!(read(&mut input, 10), Some(InputLine::new("ok")));
    }
}
