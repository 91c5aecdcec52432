//! Line framing for tokio.
//!
//! Twitch may pack several messages into one network read. [`TmiLineCodec`]
//! splits a byte stream into individual lines with their terminators
//! removed, ready for [`ParsedMessage::parse`](crate::ParsedMessage::parse).

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, ProtocolError};

/// Default line limit. Tagged Twitch lines are far longer than the
/// 512 bytes classic IRC allows.
pub const DEFAULT_MAX_LINE_LEN: usize = 8192;

/// Codec yielding one `String` per `\n`-terminated line.
///
/// A trailing `\r` is stripped and blank lines are skipped. A line over the
/// limit is reported once; the decoder then drops bytes up to the next `\n`
/// and carries on, so a stream can keep being read after an error.
#[derive(Debug)]
pub struct TmiLineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    max_len: usize,
    /// Skipping the tail of an over-long line
    discarding: bool,
}

impl TmiLineCodec {
    /// Create a codec with [`DEFAULT_MAX_LINE_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom line limit, terminator excluded.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// The configured line limit.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn finish_line(&self, mut line: BytesMut) -> error::Result<Option<String>> {
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.truncate(line.len() - 1);
        }

        if line.len() > self.max_len {
            return Err(ProtocolError::MessageTooLong {
                actual: line.len(),
                limit: self.max_len,
            });
        }

        if line.is_empty() {
            return Ok(None);
        }

        Ok(Some(String::from_utf8(line.to_vec())?))
    }
}

impl Default for TmiLineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for TmiLineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            if self.discarding {
                match src.iter().position(|b| *b == b'\n') {
                    Some(offset) => {
                        src.advance(offset + 1);
                        self.discarding = false;
                    }
                    None => {
                        src.clear();
                        return Ok(None);
                    }
                }
            }

            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if src.len() > self.max_len + 1 {
                    let actual = src.len();
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    return Err(ProtocolError::MessageTooLong {
                        actual,
                        limit: self.max_len,
                    });
                }

                // No complete line yet - remember where we stopped
                self.next_index = src.len();
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if let Some(line) = self.finish_line(line)? {
                return Ok(Some(line));
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }

        self.next_index = 0;
        if self.discarding || src.is_empty() {
            self.discarding = false;
            src.clear();
            return Ok(None);
        }

        let rest = src.split();
        self.finish_line(rest)
    }
}

impl Encoder<String> for TmiLineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> error::Result<()> {
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_terminator() {
        let mut codec = TmiLineCodec::new();
        let mut buf = BytesMut::from("PING :tmi.twitch.tv\r\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result, Some("PING :tmi.twitch.tv".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_batch() {
        let mut codec = TmiLineCodec::new();
        let mut buf = BytesMut::from(
            ":tmi.twitch.tv 001 ronni :Welcome, GLHF!\r\n\r\n:tmi.twitch.tv 002 ronni :Your host is tmi.twitch.tv\r\n",
        );

        assert_eq!(
            codec.decode(&mut buf).unwrap().as_deref(),
            Some(":tmi.twitch.tv 001 ronni :Welcome, GLHF!")
        );
        assert_eq!(
            codec.decode(&mut buf).unwrap().as_deref(),
            Some(":tmi.twitch.tv 002 ronni :Your host is tmi.twitch.tv")
        );
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = TmiLineCodec::new();
        let mut buf = BytesMut::from("PING :");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"tmi.twitch.tv\n");
        assert_eq!(
            codec.decode(&mut buf).unwrap().as_deref(),
            Some("PING :tmi.twitch.tv")
        );
    }

    #[test]
    fn test_decode_eof_flushes_last_line() {
        let mut codec = TmiLineCodec::new();
        let mut buf = BytesMut::from("PING :tmi.twitch.tv");

        assert_eq!(
            codec.decode_eof(&mut buf).unwrap().as_deref(),
            Some("PING :tmi.twitch.tv")
        );
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_decode_too_long() {
        let mut codec = TmiLineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\n");

        let result = codec.decode(&mut buf);
        assert!(matches!(result, Err(ProtocolError::MessageTooLong { .. })));
    }

    #[test]
    fn test_decode_too_long_partial_recovers() {
        let mut codec = TmiLineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long");

        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::MessageTooLong { actual: 20, limit: 10 })
        ));
        assert!(buf.is_empty());

        // The tail of the over-long line arrives with the next one.
        buf.extend_from_slice(b" and longer");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b" still\r\nPING :a\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("PING :a"));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_decode_eof_while_discarding() {
        let mut codec = TmiLineCodec::with_max_len(4);
        let mut buf = BytesMut::from("PRIVMSG #ronni");

        assert!(codec.decode(&mut buf).is_err());
        buf.extend_from_slice(b" :tail");
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_continues_after_bad_line() {
        let mut codec = TmiLineCodec::new();
        let mut buf = BytesMut::from(&b"PRIVMSG #a :\xff\xfe\r\nPING :b\r\n"[..]);

        assert!(codec.decode(&mut buf).is_err());
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("PING :b"));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let mut codec = TmiLineCodec::new();
        let mut buf = BytesMut::from(&b"PRIVMSG #a :\xff\xfe\r\n"[..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn test_encode() {
        let mut codec = TmiLineCodec::new();
        let mut buf = BytesMut::new();

        codec
            .encode("PONG :tmi.twitch.tv".to_string(), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"PONG :tmi.twitch.tv\r\n");
    }
}
