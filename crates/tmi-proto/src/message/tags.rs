//! Twitch message tag decoding.
//!
//! Twitch attaches metadata to most lines as IRCv3-style tags:
//!
//! ```text
//! @badge-info=;badges=broadcaster/1;color=#0000FF;emotes=25:0-4,12-16/1902:6-10 ...
//! ```
//!
//! A handful of tags carry structure (badge lists, emote positions, emote set
//! lists) and are decoded into typed values; everything else is kept as text.

use std::ops::RangeInclusive;

use crate::error::{ProtocolError, Result};
use crate::map::OrderedMap;

/// Well-known tag names.
pub mod names {
    /// Chat badges as `name/version` pairs.
    pub const BADGES: &str = "badges";
    /// Badge metadata, e.g. subscription length.
    pub const BADGE_INFO: &str = "badge-info";
    /// Emote positions within the message text.
    pub const EMOTES: &str = "emotes";
    /// Emote set identifiers available to the user.
    pub const EMOTE_SETS: &str = "emote-sets";
    /// Body of the message being replied to.
    pub const REPLY_PARENT_MSG_BODY: &str = "reply-parent-msg-body";
    /// Client-chosen nonce, dropped during decoding.
    pub const CLIENT_NONCE: &str = "client-nonce";
    /// AutoMod flags, dropped during decoding.
    pub const FLAGS: &str = "flags";
    /// Display color of the sender.
    pub const COLOR: &str = "color";
    /// Display name of the sender.
    pub const DISPLAY_NAME: &str = "display-name";
}

/// Tags that never make it into the decoded map.
const DROPPED_TAGS: &[&str] = &[names::CLIENT_NONCE, names::FLAGS];

/// Decoded tags in wire order.
pub type Tags = OrderedMap<TagValue>;

/// Badge name to badge version.
pub type Badges = OrderedMap<String>;

/// Emote id to the positions it occupies in the message text.
pub type Emotes = OrderedMap<Vec<EmoteRange>>;

/// The decoded value of a single tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TagValue {
    /// Verbatim value.
    Text(String),
    /// The tag was sent with an empty value.
    Absent,
    /// Decoded `badges` tag.
    Badges(Badges),
    /// Decoded `emotes` or `badge-info` tag.
    Emotes(Emotes),
    /// Decoded `emote-sets` tag.
    EmoteSets(Vec<String>),
    /// Decoded `reply-parent-msg-body` tag with `\s` turned into spaces.
    Unescaped(String),
}

impl TagValue {
    /// The value as plain text, for [`TagValue::Text`] and [`TagValue::Unescaped`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) | TagValue::Unescaped(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the tag was sent without a value.
    pub fn is_absent(&self) -> bool {
        matches!(self, TagValue::Absent)
    }

    /// The badge map, for a decoded `badges` tag.
    pub fn as_badges(&self) -> Option<&Badges> {
        match self {
            TagValue::Badges(b) => Some(b),
            _ => None,
        }
    }

    /// The emote map, for a decoded `emotes` or `badge-info` tag.
    pub fn as_emotes(&self) -> Option<&Emotes> {
        match self {
            TagValue::Emotes(e) => Some(e),
            _ => None,
        }
    }

    /// The emote set ids, for a decoded `emote-sets` tag.
    pub fn as_emote_sets(&self) -> Option<&[String]> {
        match self {
            TagValue::EmoteSets(sets) => Some(sets),
            _ => None,
        }
    }
}

/// Where an emote sits in the message text.
///
/// Positions are kept exactly as sent; use [`EmoteRange::span`] for numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EmoteRange {
    /// First character index, inclusive.
    pub start_position: String,
    /// Last character index, inclusive.
    pub end_position: String,
}

impl EmoteRange {
    /// Both positions as an inclusive character range, if they are numeric.
    pub fn span(&self) -> Option<RangeInclusive<usize>> {
        let start = self.start_position.parse().ok()?;
        let end = self.end_position.parse().ok()?;
        Some(start..=end)
    }
}

/// Decode a raw tags string (without the leading `@`).
pub(crate) fn decode_tags(raw: &str) -> Result<Tags> {
    let mut tags = Tags::new();

    for entry in raw.split(';').filter(|s| !s.is_empty()) {
        let (name, value) = match entry.split_once('=') {
            Some((name, value)) => (name, Some(value).filter(|v| !v.is_empty())),
            None => (entry, None),
        };

        if DROPPED_TAGS.contains(&name) {
            continue;
        }

        let decoded = match name {
            names::BADGES => match value {
                Some(value) => TagValue::Badges(decode_badges(value)?),
                None => TagValue::Absent,
            },
            names::BADGE_INFO | names::EMOTES => match value {
                Some(value) => TagValue::Emotes(decode_emotes(name, value)?),
                None => TagValue::Absent,
            },
            names::REPLY_PARENT_MSG_BODY => match value {
                Some(value) => TagValue::Unescaped(value.replace("\\s", " ")),
                None => return Err(ProtocolError::tag(name, None, "value is required")),
            },
            names::EMOTE_SETS => match value {
                Some(value) => TagValue::EmoteSets(value.split(',').map(str::to_owned).collect()),
                None => TagValue::Absent,
            },
            _ => match value {
                Some(value) => TagValue::Text(value.to_owned()),
                None => TagValue::Absent,
            },
        };

        tags.insert(name, decoded);
    }

    Ok(tags)
}

/// `broadcaster/1,subscriber/12`
fn decode_badges(value: &str) -> Result<Badges> {
    let mut badges = Badges::new();
    for pair in value.split(',') {
        let (name, version) = pair
            .split_once('/')
            .ok_or_else(|| ProtocolError::tag(names::BADGES, Some(value), "badge without version"))?;
        badges.insert(name, version.to_owned());
    }
    Ok(badges)
}

/// `25:0-4,12-16/1902:6-10`
fn decode_emotes(tag: &str, value: &str) -> Result<Emotes> {
    let mut emotes = Emotes::new();
    for group in value.split('/') {
        let (id, positions) = group
            .split_once(':')
            .ok_or_else(|| ProtocolError::tag(tag, Some(value), "entry without positions"))?;

        let ranges = positions
            .split(',')
            .map(|position| {
                position
                    .split_once('-')
                    .map(|(start, end)| EmoteRange {
                        start_position: start.to_owned(),
                        end_position: end.to_owned(),
                    })
                    .ok_or_else(|| ProtocolError::tag(tag, Some(value), "position without end"))
            })
            .collect::<Result<Vec<_>>>()?;

        emotes.insert(id, ranges);
    }
    Ok(emotes)
}
