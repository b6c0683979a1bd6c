//! Fuzz target for read_bounded_line
//!
//! Arbitrary console bytes must never produce a line longer than the limit
//! or one containing a line ending, and every read must make progress.

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use linechat_client::read_bounded_line;

fuzz_target!(|data: &[u8]| {
    let Some((&limit, rest)) = data.split_first() else {
        return;
    };
    let max = usize::from(limit % 64);
    let mut input = Cursor::new(rest);

    while let Ok(Some(line)) = read_bounded_line(&mut input, max) {
        assert!(line.text.chars().count() <= max);
        assert!(!line.text.contains(['\r', '\n']));
    }
});
