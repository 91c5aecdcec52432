//! Error types for the chat line decoder.
//!
//! Structural problems with the line itself surface as
//! [`ProtocolError::MalformedMessage`] wrapping a [`MessageParseError`].
//! Corrupt structured tags surface as [`ProtocolError::MalformedTagValue`].
//! A verb the decoder does not handle is *not* an error; it shows up as an
//! absent command on the parsed message.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level decoding errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// The line does not follow the message grammar.
    #[error("malformed message: {string:?}")]
    MalformedMessage {
        /// The offending line.
        string: String,
        /// What was wrong with it.
        #[source]
        cause: MessageParseError,
    },

    /// A structured tag carried a value that could not be decoded.
    #[error("malformed value for tag `{tag}`: {reason}")]
    MalformedTagValue {
        /// Tag name, e.g. `badges`.
        tag: String,
        /// Raw value as it appeared on the wire, if any.
        value: Option<String>,
        /// Short description of the defect.
        reason: &'static str,
    },

    /// I/O error while framing lines.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Framed line was not valid UTF-8.
    #[error("decode error: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Framed line exceeded the configured limit.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Length seen so far.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },
}

impl ProtocolError {
    pub(crate) fn malformed(string: &str, cause: MessageParseError) -> Self {
        ProtocolError::MalformedMessage {
            string: string.to_owned(),
            cause,
        }
    }

    pub(crate) fn tag(tag: &str, value: Option<&str>, reason: &'static str) -> Self {
        ProtocolError::MalformedTagValue {
            tag: tag.to_owned(),
            value: value.map(str::to_owned),
            reason,
        }
    }

    /// Static label for the error, suitable for log fields and counters.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedMessage { cause, .. } => cause.error_code(),
            Self::MalformedTagValue { .. } => "malformed_tag_value",
            Self::Io(_) => "io",
            Self::Decode(_) => "decode",
            Self::MessageTooLong { .. } => "message_too_long",
        }
    }
}

/// Structural defects found while segmenting or classifying a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty.
    #[error("empty message")]
    EmptyMessage,

    /// Tags section was not followed by a space.
    #[error("unterminated tags section")]
    UnterminatedTags,

    /// Source was not followed by a space.
    #[error("unterminated source")]
    UnterminatedSource,

    /// Nothing usable where the command should be.
    #[error("missing command")]
    MissingCommand,

    /// Command lacks a token its record shape requires.
    #[error("not enough arguments for {command}: expected {expected}, got {got}")]
    NotEnoughArguments {
        /// Verb being classified.
        command: String,
        /// Tokens required, verb included.
        expected: usize,
        /// Tokens present, verb included.
        got: usize,
    },

    /// Low-level scanner failure with position information.
    #[error("parsing failed at position {position}: {context}")]
    ParseContext {
        /// Byte offset where scanning stopped.
        position: usize,
        /// What was being scanned.
        context: String,
    },
}

impl MessageParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "empty_message",
            Self::UnterminatedTags => "unterminated_tags",
            Self::UnterminatedSource => "unterminated_source",
            Self::MissingCommand => "missing_command",
            Self::NotEnoughArguments { .. } => "not_enough_arguments",
            Self::ParseContext { .. } => "parse_context",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MessageParseError::NotEnoughArguments {
            command: "PRIVMSG".to_string(),
            expected: 2,
            got: 1,
        };
        assert_eq!(
            format!("{}", err),
            "not enough arguments for PRIVMSG: expected 2, got 1"
        );

        let err = ProtocolError::tag("badges", Some("broadcaster"), "badge without version");
        assert_eq!(
            format!("{}", err),
            "malformed value for tag `badges`: badge without version"
        );
    }

    #[test]
    fn test_error_source_chaining() {
        let err = ProtocolError::malformed("@a=b", MessageParseError::UnterminatedTags);
        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), "unterminated tags section");
    }

    #[test]
    fn test_error_codes() {
        let err = ProtocolError::malformed("", MessageParseError::EmptyMessage);
        assert_eq!(err.error_code(), "empty_message");

        let err = ProtocolError::tag("emotes", None, "missing range");
        assert_eq!(err.error_code(), "malformed_tag_value");

        let err: ProtocolError = String::from_utf8(vec![0xff]).unwrap_err().into();
        assert_eq!(err.error_code(), "decode");
    }
}
