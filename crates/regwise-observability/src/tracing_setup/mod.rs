//! Tracing setup: subscriber installation, span definitions and event helpers.

pub mod events;
pub mod spans;

use regwise_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding `EnvFilter` directives.
pub const LOG_ENV: &str = "REGWISE_LOG";

/// Install the global subscriber.
///
/// `REGWISE_LOG` overrides `config.log_level`. Returns `false` when a
/// subscriber was already installed, so calling this twice is harmless.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    };
    installed.is_ok()
}
