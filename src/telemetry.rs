//! Structured logging setup.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::ServerConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured `log_level`. Logs are JSON outside
/// local development.
pub fn init(config: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry.with(json_layer(std::io::stdout)).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

/// One JSON object per event, carrying the fields of the enclosing span
/// (such as `request_id`) under `span`.
pub fn json_layer<S, W>(writer: W) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn lines(buffer: &Buffer) -> Vec<Value> {
        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn json_events_carry_request_id_of_enclosing_span() {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::registry().with(json_layer(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("respond", request_id = "req-42");
            let _entered = span.enter();
            tracing::info!(kind = "text", "Response resolved");
        });

        let events = lines(&buffer);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["span"]["name"], "respond");
        assert_eq!(events[0]["span"]["request_id"], "req-42");
        assert_eq!(events[0]["fields"]["message"], "Response resolved");
    }

    #[test]
    fn json_events_outside_a_span_have_no_span_field() {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::registry().with(json_layer(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("Startup");
        });

        let events = lines(&buffer);
        assert_eq!(events.len(), 1);
        assert!(events[0].get("span").is_none());
    }
}
