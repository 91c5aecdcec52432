//! Typed command records.
//!
//! Every verb the decoder understands maps onto one of four record shapes,
//! see [`CommandKind`]. Verbs outside this set are dropped by the
//! classifier rather than represented here.

use std::fmt;
use std::str::FromStr;

use crate::response::Response;

/// Verbs whose record carries the channel they apply to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelVerb {
    /// `JOIN #channel`
    Join,
    /// `PART #channel`
    Part,
    /// `NOTICE #channel`
    Notice,
    /// `CLEARCHAT #channel` - a user's messages or the whole chat were purged
    ClearChat,
    /// `HOSTTARGET #channel` - the channel started or stopped hosting
    HostTarget,
    /// `PRIVMSG #channel`
    Privmsg,
    /// `USERSTATE #channel`
    UserState,
    /// `ROOMSTATE #channel`
    RoomState,
    /// `USERNOTICE #channel` - subs, raids and similar events
    UserNotice,
    /// `CLEARMSG #channel` - a single message was deleted
    ClearMsg,
}

impl ChannelVerb {
    /// The verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelVerb::Join => "JOIN",
            ChannelVerb::Part => "PART",
            ChannelVerb::Notice => "NOTICE",
            ChannelVerb::ClearChat => "CLEARCHAT",
            ChannelVerb::HostTarget => "HOSTTARGET",
            ChannelVerb::Privmsg => "PRIVMSG",
            ChannelVerb::UserState => "USERSTATE",
            ChannelVerb::RoomState => "ROOMSTATE",
            ChannelVerb::UserNotice => "USERNOTICE",
            ChannelVerb::ClearMsg => "CLEARMSG",
        }
    }
}

impl FromStr for ChannelVerb {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "JOIN" => ChannelVerb::Join,
            "PART" => ChannelVerb::Part,
            "NOTICE" => ChannelVerb::Notice,
            "CLEARCHAT" => ChannelVerb::ClearChat,
            "HOSTTARGET" => ChannelVerb::HostTarget,
            "PRIVMSG" => ChannelVerb::Privmsg,
            "USERSTATE" => ChannelVerb::UserState,
            "ROOMSTATE" => ChannelVerb::RoomState,
            "USERNOTICE" => ChannelVerb::UserNotice,
            "CLEARMSG" => ChannelVerb::ClearMsg,
            _ => return Err(()),
        })
    }
}

/// Verbs whose record is the verb alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimpleVerb {
    /// `PING` - must be answered with `PONG`
    Ping,
    /// `GLOBALUSERSTATE` - sent once after login
    GlobalUserState,
    /// `RECONNECT` - the server is going away
    Reconnect,
}

impl SimpleVerb {
    /// The verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            SimpleVerb::Ping => "PING",
            SimpleVerb::GlobalUserState => "GLOBALUSERSTATE",
            SimpleVerb::Reconnect => "RECONNECT",
        }
    }
}

impl FromStr for SimpleVerb {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PING" => SimpleVerb::Ping,
            "GLOBALUSERSTATE" => SimpleVerb::GlobalUserState,
            "RECONNECT" => SimpleVerb::Reconnect,
            _ => return Err(()),
        })
    }
}

/// The shape of a classified command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandKind {
    /// A verb scoped to a channel.
    Channel {
        /// Which verb.
        verb: ChannelVerb,
        /// The channel token, e.g. `#ronni`.
        channel: String,
    },
    /// A verb with no arguments of interest.
    Simple(SimpleVerb),
    /// Capability negotiation reply.
    Cap {
        /// The whole command region, e.g. `CAP * ACK`.
        raw: String,
        /// Whether the server acknowledged the request.
        is_cap_request_enabled: bool,
    },
    /// A login or names/MOTD numeric.
    Numeric {
        /// Which numeric.
        response: Response,
        /// The second token; for `001` this is the logged-in nick.
        channel: String,
    },
}

/// A `!command params` trigger typed into chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotCommand {
    /// Text between `!` and the first space.
    pub name: String,
    /// Everything after the first space, if anything.
    pub params: Option<String>,
}

/// A classified command, optionally carrying a bot command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// The record shape.
    pub kind: CommandKind,
    /// Bot command extracted from the message text.
    pub bot: Option<BotCommand>,
}

impl Command {
    /// Wrap a record shape with no bot command.
    pub fn new(kind: CommandKind) -> Self {
        Command { kind, bot: None }
    }

    /// The command name as it is reported: the verb, or the raw region for `CAP`.
    pub fn name(&self) -> &str {
        match &self.kind {
            CommandKind::Channel { verb, .. } => verb.as_str(),
            CommandKind::Simple(verb) => verb.as_str(),
            CommandKind::Cap { raw, .. } => raw,
            CommandKind::Numeric { response, .. } => response.as_str(),
        }
    }

    /// The channel token, for channel and numeric records.
    pub fn channel(&self) -> Option<&str> {
        match &self.kind {
            CommandKind::Channel { channel, .. } | CommandKind::Numeric { channel, .. } => {
                Some(channel)
            }
            CommandKind::Simple(_) | CommandKind::Cap { .. } => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel() {
            Some(channel) => write!(f, "{} {}", self.name(), channel),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Command {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("command", self.name())?;
        match &self.kind {
            CommandKind::Channel { channel, .. } | CommandKind::Numeric { channel, .. } => {
                map.serialize_entry("channel", channel)?;
            }
            CommandKind::Cap {
                is_cap_request_enabled,
                ..
            } => {
                map.serialize_entry("isCapRequestEnabled", is_cap_request_enabled)?;
            }
            CommandKind::Simple(_) => {}
        }
        if let Some(bot) = &self.bot {
            map.serialize_entry("botCommand", &bot.name)?;
            if let Some(params) = &bot.params {
                map.serialize_entry("botCommandParams", params)?;
            }
        }
        map.end()
    }
}
