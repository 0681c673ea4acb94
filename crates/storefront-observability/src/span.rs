//! Command spans.

use crate::RequestId;
use tracing::Span;

/// Root span for one CLI command run.
///
/// Every event emitted while the span is entered carries the command name,
/// the request id and, when set, the configured environment.
pub fn command_span(command: &str, request_id: &RequestId, environment: Option<&str>) -> Span {
    tracing::info_span!(
        "command",
        command = command,
        request_id = %request_id,
        environment = environment.unwrap_or("default"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_span_fields() {
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let span = command_span("browse", &RequestId::from_string("req-1"), Some("staging"));
            assert!(!span.is_disabled());

            let meta = span.metadata().unwrap();
            assert_eq!(meta.name(), "command");
            assert_eq!(*meta.level(), tracing::Level::INFO);
            for field in ["command", "request_id", "environment"] {
                assert!(meta.fields().field(field).is_some(), "missing {}", field);
            }
        });
    }

    #[test]
    fn test_events_inside_span() {
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let span = command_span("region", &RequestId::generate(), None);
            span.in_scope(|| {
                assert_eq!(Span::current().metadata().map(|m| m.name()), Some("command"));
                tracing::info!(count = 3, "regions listed");
            });
        });
    }
}
