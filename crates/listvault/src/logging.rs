use anyhow::anyhow;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Start error reporting. Stays disabled unless `SENTRY_DSN` is set.
///
/// Keep the guard alive for the whole process; dropping it flushes pending
/// events.
pub fn init_error_reporting() -> sentry::ClientInitGuard {
    sentry::init(sentry::ClientOptions {
        release: sentry::release_name!(),
        ..Default::default()
    })
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info`.
///
/// Error events are also forwarded to error reporting, warnings and below
/// become breadcrumbs.
pub fn init(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let output = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let output = match format {
        LogFormat::Text => output.boxed(),
        LogFormat::Json => output.json().boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .with(sentry_tracing::layer())
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reporting_is_off_without_dsn() {
        if std::env::var_os("SENTRY_DSN").is_some() {
            return;
        }
        let guard = init_error_reporting();
        assert!(!guard.is_enabled());
    }

    #[test]
    fn test_error_events_are_reported() {
        let events = sentry::test::with_captured_events(|| {
            let subscriber = tracing_subscriber::registry().with(sentry_tracing::layer());
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!("downloaded");
                tracing::error!("source failed");
            });
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message.as_deref(), Some("source failed"));
    }
}
