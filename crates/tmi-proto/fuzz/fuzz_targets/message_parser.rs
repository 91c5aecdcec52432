//! Fuzz target for chat line decoding.
//!
//! Any UTF-8 input must decode to a record or a typed error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > tmi_proto::DEFAULT_MAX_LINE_LEN {
            return;
        }

        if let Ok(msg) = tmi_proto::ParsedMessage::parse(input) {
            // Ignored lines carry nothing else.
            if msg.is_ignored() {
                assert!(msg.tags.is_none() && msg.source.is_none() && msg.message.is_none());
            }
        }
    }
});
