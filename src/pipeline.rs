//! Reads framed lines, decodes them, and writes one JSON record per line.

use bytes::BytesMut;
use futures_util::StreamExt;
use tmi_proto::{ParsedMessage, ProtocolError, TmiLineCodec, TracingSink};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{Decoder, FramedRead};
use tracing::warn;

use crate::config::Config;
use crate::telemetry::spans;

/// Per-run counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Lines decoded into a command.
    pub decoded: u64,
    /// Lines the decoder deliberately dropped.
    pub ignored: u64,
    /// Lines that could not be framed or decoded.
    pub failed: u64,
}

/// What happened to one line.
#[derive(Debug)]
pub enum Outcome {
    Decoded(ParsedMessage),
    Ignored(ParsedMessage),
    Failed,
}

/// Hands framing errors to the caller as items.
///
/// `FramedRead` ends the stream after a decoder error, so an over-long or
/// non-UTF-8 line would otherwise cut the run short. Only I/O errors stop
/// reading.
struct PerLine(TmiLineCodec);

impl PerLine {
    fn lift(
        result: tmi_proto::Result<Option<String>>,
    ) -> std::io::Result<Option<tmi_proto::Result<String>>> {
        match result {
            Ok(line) => Ok(line.map(Ok)),
            Err(ProtocolError::Io(e)) => Err(e),
            Err(e) => Ok(Some(Err(e))),
        }
    }
}

impl Decoder for PerLine {
    type Item = tmi_proto::Result<String>;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> std::io::Result<Option<Self::Item>> {
        Self::lift(self.0.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> std::io::Result<Option<Self::Item>> {
        Self::lift(self.0.decode_eof(src))
    }
}

/// Decode a single line inside its own span, logging failures.
pub fn decode_line(number: u64, line: &str) -> Outcome {
    let _span = spans::line(number).entered();

    match ParsedMessage::parse_with(line, &TracingSink) {
        Ok(msg) if msg.is_ignored() => Outcome::Ignored(msg),
        Ok(msg) => Outcome::Decoded(msg),
        Err(e) => {
            warn!(line = %line, error = %e, code = e.error_code(), "Dropping line that failed to decode");
            Outcome::Failed
        }
    }
}

/// Decode every line from `reader`, writing records to `writer`.
pub async fn run<R, W>(reader: R, mut writer: W, config: &Config) -> anyhow::Result<Stats>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let codec = TmiLineCodec::with_max_len(config.input.max_line_len);
    let mut lines = FramedRead::new(reader, PerLine(codec));
    let mut stats = Stats::default();
    let mut number = 0;

    while let Some(line) = lines.next().await {
        number += 1;

        let line = match line? {
            Ok(line) => line,
            Err(e) => {
                warn!(number, error = %e, code = e.error_code(), "Dropping unreadable line");
                stats.failed += 1;
                continue;
            }
        };

        let record = match decode_line(number, &line) {
            Outcome::Decoded(msg) => {
                stats.decoded += 1;
                msg
            }
            Outcome::Ignored(msg) => {
                stats.ignored += 1;
                if !config.output.include_ignored {
                    continue;
                }
                msg
            }
            Outcome::Failed => {
                stats.failed += 1;
                continue;
            }
        };

        let mut bytes = if config.output.pretty {
            serde_json::to_vec_pretty(&record)?
        } else {
            serde_json::to_vec(&record)?
        };
        bytes.push(b'\n');
        writer.write_all(&bytes).await?;
    }

    writer.flush().await?;
    Ok(stats)
}
