//! Diagnostic events raised while classifying commands.
//!
//! The decoder never prints. Anything worth telling the operator about is
//! handed to an [`EventSink`] supplied by the caller.

/// Something the decoder noticed that is not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The server rejected a command we sent (numeric `421`).
    UnsupportedCommand {
        /// The command the server did not understand.
        verb: String,
    },
    /// The server is about to drop the connection for maintenance.
    ReconnectAdvisory,
    /// A verb the decoder does not classify; the line was dropped.
    IgnoredCommand {
        /// The verb of the dropped line.
        verb: String,
    },
}

/// Receiver for [`Event`]s.
///
/// `emit` takes `&self` so one sink can be shared by concurrent decoders.
pub trait EventSink {
    /// Handle one event.
    fn emit(&self, event: Event);
}

impl<F> EventSink for F
where
    F: Fn(Event),
{
    fn emit(&self, event: Event) {
        self(event)
    }
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: Event) {}
}

/// Sink that forwards events to `tracing`.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        match event {
            Event::UnsupportedCommand { verb } => {
                tracing::warn!(verb = %verb, "Unsupported IRC command");
            }
            Event::ReconnectAdvisory => {
                tracing::info!("Server will terminate the connection for maintenance");
            }
            Event::IgnoredCommand { verb } => {
                tracing::debug!(verb = %verb, "Ignoring unexpected command");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_sink() {
        let seen = RefCell::new(Vec::new());
        let sink = |event: Event| seen.borrow_mut().push(event);

        sink.emit(Event::ReconnectAdvisory);
        sink.emit(Event::UnsupportedCommand {
            verb: "WHO".to_string(),
        });

        assert_eq!(
            seen.into_inner(),
            vec![
                Event::ReconnectAdvisory,
                Event::UnsupportedCommand {
                    verb: "WHO".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_noop_sink() {
        NoopSink.emit(Event::ReconnectAdvisory);
    }
}
