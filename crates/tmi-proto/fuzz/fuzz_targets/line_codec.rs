//! Fuzz target for line framing.

#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut codec = tmi_proto::TmiLineCodec::with_max_len(512);
    let mut buf = BytesMut::from(data);

    while let Ok(Some(line)) = codec.decode(&mut buf) {
        assert!(!line.is_empty());
        assert!(!line.ends_with('\r') && !line.ends_with('\n'));
    }
    let _ = codec.decode_eof(&mut buf);
});
