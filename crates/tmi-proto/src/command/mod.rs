//! Command classification.
//!
//! The command region of a line (verb plus following tokens) is turned into
//! a typed [`Command`], or dropped when the verb is one the decoder ignores.

pub(crate) mod bot;
mod parse;
mod types;

pub(crate) use self::parse::classify;
pub use self::types::{BotCommand, ChannelVerb, Command, CommandKind, SimpleVerb};
