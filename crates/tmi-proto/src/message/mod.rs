//! Chat line decoding.

mod segment;
/// Twitch tag decoding.
pub mod tags;
mod types;

pub use self::types::ParsedMessage;
