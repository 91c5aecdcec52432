//! Positional segmentation of a raw chat line.
//!
//! ```text
//! [@tags ][:source ]command[ :parameters]
//! ```
//!
//! The command region runs up to the first `:` after the source, so
//! everything after it is one opaque parameters string.

use nom::{
    bytes::complete::{take_till, take_until},
    character::complete::char,
    combinator::{opt, rest},
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::MessageParseError;

/// Tags: after `@`, up to and consuming the first space.
fn parse_tags(input: &str) -> IResult<&str, &str> {
    terminated(preceded(char('@'), take_until(" ")), char(' '))(input)
}

/// Source: after `:`, up to and consuming the next space.
fn parse_source(input: &str) -> IResult<&str, &str> {
    terminated(preceded(char(':'), take_until(" ")), char(' '))(input)
}

/// Command region: everything before the next `:`.
fn parse_command(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == ':')(input)
}

/// Parameters: everything after the `:` that closed the command region.
fn parse_params(input: &str) -> IResult<&str, Option<&str>> {
    opt(preceded(char(':'), rest))(input)
}

/// The four raw regions of a line, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segments<'a> {
    /// Raw tags without the leading `@`. Never empty.
    pub tags: Option<&'a str>,
    /// Raw source without the leading `:`. Never empty.
    pub source: Option<&'a str>,
    /// Trimmed command region: verb plus its tokens.
    pub command: &'a str,
    /// Raw parameters after the `:`. Never empty.
    pub params: Option<&'a str>,
}

impl<'a> Segments<'a> {
    pub(crate) fn split(line: &'a str) -> Result<Self, MessageParseError> {
        if line.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let mut input = line;

        let mut tags = None;
        if input.starts_with('@') {
            let (next, raw) = parse_tags(input).map_err(|_| MessageParseError::UnterminatedTags)?;
            tags = Some(raw).filter(|t| !t.is_empty());
            input = next;
        }

        let mut source = None;
        if input.starts_with(':') {
            let (next, raw) =
                parse_source(input).map_err(|_| MessageParseError::UnterminatedSource)?;
            source = Some(raw).filter(|s| !s.is_empty());
            input = next;
        }

        if input.is_empty() {
            return Err(MessageParseError::MissingCommand);
        }

        let (input, command) = parse_command(input).map_err(|e| scan_error(line, e, "command"))?;
        let command = command.trim();
        if command.is_empty() {
            return Err(MessageParseError::MissingCommand);
        }

        let (_, params) = parse_params(input).map_err(|e| scan_error(line, e, "parameters"))?;

        Ok(Segments {
            tags,
            source,
            command,
            params: params.filter(|p| !p.is_empty()),
        })
    }
}

fn scan_error(
    line: &str,
    err: nom::Err<nom::error::Error<&str>>,
    context: &str,
) -> MessageParseError {
    let position = match &err {
        nom::Err::Error(e) | nom::Err::Failure(e) => line.len() - e.input.len(),
        nom::Err::Incomplete(_) => line.len(),
    };
    MessageParseError::ParseContext {
        position,
        context: format!("scanning {}", context),
    }
}
