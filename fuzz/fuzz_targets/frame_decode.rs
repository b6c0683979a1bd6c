//! Fuzz target for ChatFrame::decode
//!
//! Whatever a peer sends must decode or be rejected, never panic. Decoded
//! frames must render within the receive capacity.

#![no_main]

use libfuzzer_sys::fuzz_target;
use linechat_proto::{ChatFrame, limits::MAX_FRAME_BYTES};

fuzz_target!(|data: &[u8]| {
    if let Ok(frame) = ChatFrame::decode(data) {
        assert!(data.len() <= MAX_FRAME_BYTES);
        assert!(!frame.text.ends_with('\n'));
    }
});
