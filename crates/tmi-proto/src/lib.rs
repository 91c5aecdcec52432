//! # tmi-proto
//!
//! Decoder for the IRC dialect spoken by Twitch chat (TMI).
//!
//! A single raw line is turned into a [`ParsedMessage`] exposing its
//! decoded tags, source identity, typed command and trailing text. Lines
//! Twitch sends that a chat client has no use for are recognized and
//! dropped rather than reported as errors.
//!
//! ## Features
//!
//! - Segmentation of `@tags :source COMMAND args :parameters` lines
//! - Typed decoding of `badges`, `badge-info`, `emotes`, `emote-sets` and
//!   `reply-parent-msg-body`
//! - Closed command records for every verb Twitch chat uses
//! - Extraction of `!command args` triggers typed into chat
//! - Optional tokio line codec and `tracing` event sink

//! ## Quick Start
//!
//! ```rust
//! use tmi_proto::ParsedMessage;
//!
//! let raw = "@badges=broadcaster/1;color=#0000FF :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #ronni :!dice 2d6";
//! let msg: ParsedMessage = raw.parse().expect("valid chat line");
//!
//! assert_eq!(msg.channel(), Some("#ronni"));
//! let bot = msg.bot_command().expect("bot command");
//! assert_eq!(bot.name, "dice");
//! assert_eq!(bot.params.as_deref(), Some("2d6"));
//! ```
//!
//! Diagnostic events (unsupported commands, reconnect notices) go to a
//! caller-supplied [`EventSink`]:
//!
//! ```rust
//! use tmi_proto::{Event, ParsedMessage};
//!
//! let sink = |event: Event| eprintln!("{:?}", event);
//! let msg = ParsedMessage::parse_with(":tmi.twitch.tv RECONNECT", &sink).unwrap();
//! assert!(!msg.is_ignored());
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod events;
#[cfg(feature = "tokio")]
pub mod line;
pub mod map;
pub mod message;
pub mod response;
pub mod source;

pub use self::command::{BotCommand, ChannelVerb, Command, CommandKind, SimpleVerb};
pub use self::error::{MessageParseError, ProtocolError, Result};
#[cfg(feature = "tracing")]
pub use self::events::TracingSink;
pub use self::events::{Event, EventSink, NoopSink};
#[cfg(feature = "tokio")]
pub use self::line::{TmiLineCodec, DEFAULT_MAX_LINE_LEN};
pub use self::map::OrderedMap;
pub use self::message::tags::{Badges, EmoteRange, Emotes, TagValue, Tags};
pub use self::message::ParsedMessage;
pub use self::response::Response;
pub use self::source::Identity;
