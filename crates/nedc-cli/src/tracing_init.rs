use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use nedc_config::{LogFormat, LoggingConfig};

/// Initialise the `tracing` subscriber stack from [`LoggingConfig`].
///
/// Unlike the service this harness borrows its conventions from, there is
/// no file-appender layer or custom event formatter here — `nedc-cli` is a
/// development tool, not a long-running process, so stderr is the only
/// sink. `RUST_LOG` overrides `config.level` when set.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let result = if config.format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_target(false).with_filter(filter))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_filter(filter))
            .try_init()
    };

    if result.is_err() {
        // A subscriber is already installed (e.g. under a test harness);
        // leave it in place rather than panicking.
    }
}
