//! Logging setup
//!
//! `RUST_LOG` overrides the level passed in. File output rotates daily.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of rotated log files
pub const LOG_FILE_PREFIX: &str = "storefront";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber
///
/// # Arguments
/// * `level` - default filter (e.g., "info", "storefront_client=debug")
/// * `json_format` - JSON console output instead of the human-readable one
/// * `log_dir` - also write JSON logs to daily files under this directory
///
/// Fails if a global subscriber is already installed.
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer: BoxedLayer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };
    let mut layers = vec![console_layer];

    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(appender))
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    tracing::info!(level, json_format, file = log_dir.is_some(), "Logger initialized");
    Ok(())
}

/// Route logs through the test harness's captured output
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
