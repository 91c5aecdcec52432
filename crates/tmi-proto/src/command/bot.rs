//! Bot command extraction from chat text.

use super::types::BotCommand;

/// Pull `!name params` out of message text.
///
/// Returns `None` when the text does not start with `!`.
pub(crate) fn extract(text: &str) -> Option<BotCommand> {
    let text = text.strip_prefix('!')?.trim();

    Some(match text.split_once(' ') {
        Some((name, params)) => BotCommand {
            name: name.to_owned(),
            params: Some(params.trim_start().to_owned()),
        },
        None => BotCommand {
            name: text.to_owned(),
            params: None,
        },
    })
}
