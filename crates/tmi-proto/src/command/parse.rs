//! Verb classification.

use smallvec::SmallVec;

use crate::error::MessageParseError;
use crate::events::{Event, EventSink};
use crate::response::Response;

use super::types::{ChannelVerb, Command, CommandKind, SimpleVerb};

/// `ERR_UNKNOWNCOMMAND`, the server's reply to a command it does not support.
const ERR_UNKNOWNCOMMAND: &str = "421";

/// Which record shape a verb produces.
enum Shape {
    Channel(ChannelVerb),
    Simple(SimpleVerb),
    Cap,
    Numeric(Response),
    Unsupported,
    Ignored,
}

impl Shape {
    fn of(verb: &str) -> Shape {
        if let Ok(verb) = verb.parse::<ChannelVerb>() {
            return Shape::Channel(verb);
        }
        if let Ok(verb) = verb.parse::<SimpleVerb>() {
            return Shape::Simple(verb);
        }
        if let Some(response) = Response::from_verb(verb) {
            return Shape::Numeric(response);
        }
        match verb {
            "CAP" => Shape::Cap,
            ERR_UNKNOWNCOMMAND => Shape::Unsupported,
            _ => Shape::Ignored,
        }
    }
}

/// Classify a trimmed command region.
///
/// `Ok(None)` means the line is deliberately ignored.
pub(crate) fn classify<S>(region: &str, sink: &S) -> Result<Option<Command>, MessageParseError>
where
    S: EventSink + ?Sized,
{
    let tokens: SmallVec<[&str; 4]> = region.split_ascii_whitespace().collect();
    let verb = *tokens.first().ok_or(MessageParseError::MissingCommand)?;

    let kind = match Shape::of(verb) {
        Shape::Channel(verb) => CommandKind::Channel {
            verb,
            channel: argument(&tokens, 1)?.to_owned(),
        },
        Shape::Simple(verb) => {
            if verb == SimpleVerb::Reconnect {
                sink.emit(Event::ReconnectAdvisory);
            }
            CommandKind::Simple(verb)
        }
        Shape::Cap => CommandKind::Cap {
            raw: region.to_owned(),
            is_cap_request_enabled: argument(&tokens, 2)? == "ACK",
        },
        Shape::Numeric(response) => CommandKind::Numeric {
            response,
            channel: argument(&tokens, 1)?.to_owned(),
        },
        Shape::Unsupported => {
            let verb = tokens.get(2).copied().unwrap_or_default();
            sink.emit(Event::UnsupportedCommand {
                verb: verb.to_owned(),
            });
            return Ok(None);
        }
        Shape::Ignored => {
            sink.emit(Event::IgnoredCommand {
                verb: verb.to_owned(),
            });
            return Ok(None);
        }
    };

    Ok(Some(Command::new(kind)))
}

fn argument<'a>(tokens: &[&'a str], index: usize) -> Result<&'a str, MessageParseError> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| MessageParseError::NotEnoughArguments {
            command: tokens[0].to_owned(),
            expected: index + 1,
            got: tokens.len(),
        })
}
