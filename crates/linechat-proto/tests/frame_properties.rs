//! Property-based tests for message framing.
//!
//! These check the wire form for all bounded inputs, not just a few
//! examples: the payload is always `handle> text`, never exceeds the frame
//! bound, and what a peer decodes is what the user typed.

use linechat_proto::{
    ChatFrame, Handle, MAX_FRAME_LEN, MAX_HANDLE_LEN, MAX_MESSAGE_LEN, ProtocolError,
    encode_message,
};
use proptest::prelude::*;

/// Strategy for handles a user could type (no separator inside)
fn arbitrary_handle() -> impl Strategy<Value = Handle> {
    "[a-zA-Z0-9_.-]{0,10}".prop_map(|name| Handle::new(name).unwrap())
}

/// Strategy for message text within the limit, no line endings
fn arbitrary_text() -> impl Strategy<Value = String> {
    let line_char = any::<char>().prop_filter("no line endings", |c| *c != '\r' && *c != '\n');
    prop::collection::vec(line_char, 0..=MAX_MESSAGE_LEN).prop_map(|chars| chars.into_iter().collect())
}

#[test]
fn prop_payload_is_handle_separator_text() {
    proptest!(|(handle in arbitrary_handle(), text in arbitrary_text())| {
        let wire = encode_message(&handle, &text).expect("bounded text should encode");

        // PROPERTY: sent payload is exactly identity + "> " + text
        let expected = format!("{handle}> {text}");
        prop_assert_eq!(&wire[..], expected.as_bytes());
        prop_assert!(expected.chars().count() <= MAX_FRAME_LEN);
    });
}

#[test]
fn prop_peer_sees_what_was_typed() {
    proptest!(|(handle in arbitrary_handle(), text in "[ -~]{0,500}")| {
        let wire = encode_message(&handle, &text).expect("bounded text should encode");
        let frame = ChatFrame::decode(&wire).expect("encoded frame should decode");

        prop_assert_eq!(frame.sender.as_deref(), Some(handle.as_str()));
        prop_assert_eq!(frame.text, text);
    });
}

#[test]
fn prop_overlong_text_rejected() {
    proptest!(|(handle in arbitrary_handle(), extra in 1usize..64)| {
        let text = "m".repeat(MAX_MESSAGE_LEN + extra);
        let result = encode_message(&handle, &text);

        prop_assert_eq!(
            result,
            Err(ProtocolError::MessageTooLong { len: MAX_MESSAGE_LEN + extra, max: MAX_MESSAGE_LEN })
        );
    });
}

#[test]
fn prop_truncated_handle_is_bounded_prefix() {
    proptest!(|(raw in "[^\r\n]{0,40}")| {
        let handle = Handle::truncated(&raw, MAX_HANDLE_LEN);

        prop_assert!(handle.len() <= MAX_HANDLE_LEN);
        prop_assert!(raw.starts_with(handle.as_str()));
        if raw.chars().count() <= MAX_HANDLE_LEN {
            prop_assert_eq!(handle.as_str(), raw.as_str());
        }
    });
}

#[test]
fn prop_decode_never_panics() {
    proptest!(|(bytes in prop::collection::vec(any::<u8>(), 0..2100))| {
        let _ = ChatFrame::decode(&bytes);
    });
}
