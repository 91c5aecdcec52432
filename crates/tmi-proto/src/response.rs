//! Numeric replies Twitch sends during login and channel joins.
//!
//! # Reference
//! - <https://dev.twitch.tv/docs/irc/>

#![allow(non_camel_case_types)]

/// Numeric reply code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Response {
    /// 001 - Login succeeded
    RPL_WELCOME = 1,
    /// 002 - Your host
    RPL_YOURHOST = 2,
    /// 003 - Server creation notice
    RPL_CREATED = 3,
    /// 004 - Server info
    RPL_MYINFO = 4,
    /// 353 - Names list for a joined channel
    RPL_NAMREPLY = 353,
    /// 366 - End of names list
    RPL_ENDOFNAMES = 366,
    /// 372 - Message of the day line
    RPL_MOTD = 372,
    /// 375 - Start of message of the day
    RPL_MOTDSTART = 375,
    /// 376 - End of message of the day
    RPL_ENDOFMOTD = 376,
}

impl Response {
    /// Look up a numeric by its three-digit verb.
    pub fn from_verb(verb: &str) -> Option<Response> {
        Some(match verb {
            "001" => Response::RPL_WELCOME,
            "002" => Response::RPL_YOURHOST,
            "003" => Response::RPL_CREATED,
            "004" => Response::RPL_MYINFO,
            "353" => Response::RPL_NAMREPLY,
            "366" => Response::RPL_ENDOFNAMES,
            "372" => Response::RPL_MOTD,
            "375" => Response::RPL_MOTDSTART,
            "376" => Response::RPL_ENDOFMOTD,
            _ => return None,
        })
    }

    /// The numeric code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// The verb as it appears on the wire, zero-padded.
    pub fn as_str(self) -> &'static str {
        match self {
            Response::RPL_WELCOME => "001",
            Response::RPL_YOURHOST => "002",
            Response::RPL_CREATED => "003",
            Response::RPL_MYINFO => "004",
            Response::RPL_NAMREPLY => "353",
            Response::RPL_ENDOFNAMES => "366",
            Response::RPL_MOTD => "372",
            Response::RPL_MOTDSTART => "375",
            Response::RPL_ENDOFMOTD => "376",
        }
    }
}
