//! Message source identity.
//!
//! Twitch sends either a bare host for server-originated lines
//! (`:tmi.twitch.tv`) or `nick!user@host` for user-originated ones.

/// Who sent a message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Identity {
    /// Nickname, absent for server-originated lines.
    pub nick: Option<String>,
    /// The text between the first and second `!`, or the whole source
    /// without one.
    pub host: String,
}

impl Identity {
    /// Split a raw source (without the leading `:`) on `!`.
    ///
    /// The split is literal: `ronni!ronni@ronni.tmi.twitch.tv` yields the
    /// host `ronni@ronni.tmi.twitch.tv`. Anything after a second `!` is
    /// dropped.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split('!');
        let first = parts.next().unwrap_or_default();
        match parts.next() {
            Some(host) => Identity {
                nick: Some(first.to_owned()),
                host: host.to_owned(),
            },
            None => Identity {
                nick: None,
                host: raw.to_owned(),
            },
        }
    }

    /// Whether the line came from the server rather than a user.
    pub fn is_server(&self) -> bool {
        self.nick.is_none()
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Identity::parse(s)
    }
}
