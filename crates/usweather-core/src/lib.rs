pub mod config;
pub mod error;

pub use config::{Config, SearchConfig, SearchVariant, ServiceConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError, WeatherError};

use anyhow::Result;

/// Initialize logging.
///
/// `RUST_LOG` wins when set; otherwise the filter is `info`, or `debug` when
/// `verbose` is requested. Output goes to stderr so stdout stays reserved for
/// rendered forecasts.
pub fn init(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("usweather core initialized");
    Ok(())
}
