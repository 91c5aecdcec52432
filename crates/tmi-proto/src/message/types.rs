//! The decoded message record and the decoding pipeline.

use std::str::FromStr;

use crate::command::{self, bot, BotCommand, Command, CommandKind};
use crate::error::{ProtocolError, Result};
use crate::events::{EventSink, NoopSink};
use crate::source::Identity;

use super::segment::Segments;
use super::tags::{decode_tags, TagValue, Tags};

/// Parameters text Twitch uses to mean "no message".
const EMPTY_PARAMS: &str = "-";

/// A decoded chat line.
///
/// When `command` is `None` the line was deliberately ignored and every
/// other field is `None` as well.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedMessage {
    /// Decoded tags, if the line had any.
    pub tags: Option<Tags>,
    /// Who sent the line.
    pub source: Option<Identity>,
    /// The classified command.
    pub command: Option<Command>,
    /// Parameters text, e.g. the chat message.
    pub message: Option<String>,
}

impl ParsedMessage {
    /// Decode a line, discarding diagnostic events.
    pub fn parse(line: &str) -> Result<ParsedMessage> {
        Self::parse_with(line, &NoopSink)
    }

    /// Decode a line, reporting diagnostic events to `sink`.
    ///
    /// The line must not include its `\r\n` terminator.
    pub fn parse_with<S>(line: &str, sink: &S) -> Result<ParsedMessage>
    where
        S: EventSink + ?Sized,
    {
        let segments =
            Segments::split(line).map_err(|cause| ProtocolError::malformed(line, cause))?;

        let Some(mut command) = command::classify(segments.command, sink)
            .map_err(|cause| ProtocolError::malformed(line, cause))?
        else {
            return Ok(ParsedMessage::default());
        };

        let tags = segments.tags.map(decode_tags).transpose()?;
        let source = segments.source.map(Identity::parse);

        if let Some(params) = segments.params {
            command.bot = bot::extract(params);
        }

        Ok(ParsedMessage {
            tags,
            source,
            command: Some(command),
            message: segments
                .params
                .filter(|params| *params != EMPTY_PARAMS)
                .map(str::to_owned),
        })
    }

    /// Whether the line was dropped by the classifier.
    pub fn is_ignored(&self) -> bool {
        self.command.is_none()
    }

    /// Look up a decoded tag.
    pub fn tag(&self, name: &str) -> Option<&TagValue> {
        self.tags.as_ref()?.get(name)
    }

    /// The channel the command applies to, if any.
    pub fn channel(&self) -> Option<&str> {
        self.command.as_ref()?.channel()
    }

    /// The bot command typed into chat, if any.
    pub fn bot_command(&self) -> Option<&BotCommand> {
        self.command.as_ref()?.bot.as_ref()
    }

    /// Capability names listed in a `CAP` reply.
    pub fn capabilities(&self) -> Vec<&str> {
        match (&self.command, &self.message) {
            (
                Some(Command {
                    kind: CommandKind::Cap { .. },
                    ..
                }),
                Some(message),
            ) => message.split_ascii_whitespace().collect(),
            _ => Vec::new(),
        }
    }
}

impl FromStr for ParsedMessage {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<ParsedMessage> {
        ParsedMessage::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{ChannelVerb, SimpleVerb};
    use crate::error::MessageParseError;
    use crate::events::Event;
    use std::cell::RefCell;

    const PRIVMSG: &str = "@badges=broadcaster/1;color=#0000FF :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #ronni :Kappa Keepo Kappa";

    #[test]
    fn test_parse_privmsg() {
        let msg: ParsedMessage = PRIVMSG.parse().unwrap();

        let badges = msg.tag("badges").and_then(TagValue::as_badges).unwrap();
        assert_eq!(badges.get("broadcaster").map(String::as_str), Some("1"));
        assert_eq!(msg.tag("color").and_then(TagValue::as_str), Some("#0000FF"));
        assert_eq!(
            msg.source,
            Some(Identity {
                nick: Some("ronni".to_string()),
                host: "ronni@ronni.tmi.twitch.tv".to_string(),
            })
        );
        assert_eq!(
            msg.command.as_ref().map(|c| &c.kind),
            Some(&CommandKind::Channel {
                verb: ChannelVerb::Privmsg,
                channel: "#ronni".to_string()
            })
        );
        assert_eq!(msg.message.as_deref(), Some("Kappa Keepo Kappa"));
        assert_eq!(msg.bot_command(), None);
    }

    #[test]
    fn test_parse_ping() {
        let msg = ParsedMessage::parse("PING :tmi.twitch.tv").unwrap();
        assert_eq!(
            msg.command.map(|c| c.kind),
            Some(CommandKind::Simple(SimpleVerb::Ping))
        );
        assert_eq!(msg.source, None);
        assert_eq!(msg.tags, None);
        assert_eq!(msg.message.as_deref(), Some("tmi.twitch.tv"));
    }

    #[test]
    fn test_parse_bot_command() {
        let msg = ParsedMessage::parse(
            "@badges=;color=#0000FF :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #ronni :!dice 2d6",
        )
        .unwrap();

        let bot = msg.bot_command().unwrap();
        assert_eq!(bot.name, "dice");
        assert_eq!(bot.params.as_deref(), Some("2d6"));
        assert_eq!(msg.tag("badges"), Some(&TagValue::Absent));
        assert_eq!(msg.message.as_deref(), Some("!dice 2d6"));
    }

    #[test]
    fn test_dash_params_are_absent() {
        let msg = ParsedMessage::parse(":tmi.twitch.tv HOSTTARGET #abc :- 0").unwrap();
        assert_eq!(msg.message.as_deref(), Some("- 0"));

        let msg = ParsedMessage::parse(":tmi.twitch.tv HOSTTARGET #abc :-").unwrap();
        assert_eq!(msg.message, None);
        assert_eq!(msg.channel(), Some("#abc"));
    }

    #[test]
    fn test_ignored_line_drops_everything() {
        let msg = ParsedMessage::parse("@emotes=broken :tmi.twitch.tv PONG :tmi.twitch.tv").unwrap();
        assert!(msg.is_ignored());
        assert_eq!(msg, ParsedMessage::default());
    }

    #[test]
    fn test_unsupported_command_event() {
        let seen = RefCell::new(Vec::new());
        let sink = |event: Event| seen.borrow_mut().push(event);

        let msg =
            ParsedMessage::parse_with(":tmi.twitch.tv 421 ronni WHO :Unknown command", &sink)
                .unwrap();
        assert!(msg.is_ignored());
        assert_eq!(
            seen.into_inner(),
            vec![Event::UnsupportedCommand {
                verb: "WHO".to_string()
            }]
        );
    }

    #[test]
    fn test_capabilities() {
        let msg = ParsedMessage::parse(
            ":tmi.twitch.tv CAP * ACK :twitch.tv/commands twitch.tv/tags",
        )
        .unwrap();
        assert_eq!(
            msg.capabilities(),
            vec!["twitch.tv/commands", "twitch.tv/tags"]
        );
        assert_eq!(msg.command.as_ref().map(Command::name), Some("CAP * ACK"));
    }

    #[test]
    fn test_malformed_line() {
        let err = ParsedMessage::parse("@badges=broadcaster/1").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MalformedMessage {
                cause: MessageParseError::UnterminatedTags,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_tag_aborts() {
        let err = ParsedMessage::parse(
            "@badges=broadcaster :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #ronni :hi",
        )
        .unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedTagValue { .. }));
    }
}
