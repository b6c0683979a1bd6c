//! One-time handle capture.

use std::io::{BufRead, Write};

use linechat_proto::Handle;

use crate::{error::ClientError, input::read_bounded_line};

/// Prompt shown before the handle is read.
pub fn name_prompt(max_len: usize) -> String {
    format!("Please enter your name ({max_len} characters max):")
}

/// Ask the user for a handle and read it from `input`.
///
/// The handle is cut to `max_len` characters (clamped to the protocol limit)
/// and anything typed past the limit is discarded up to the end of the line.
/// Returns `None` if input ends before a handle is entered.
///
/// # Errors
///
/// - `ClientError::Console` if reading or writing the console fails
pub fn capture_identity<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    max_len: usize,
) -> Result<Option<Handle>, ClientError> {
    let limit = max_len.min(linechat_proto::MAX_HANDLE_LEN);

    writeln!(output, "{}", name_prompt(limit))?;
    output.flush()?;

    let Some(line) = read_bounded_line(input, limit)? else {
        tracing::debug!("input closed before a handle was entered");
        return Ok(None);
    };

    if line.truncated {
        tracing::info!(limit, "handle truncated");
    }

    Ok(Some(Handle::truncated(&line.text, limit)))
}
