pub mod config;
pub mod error;

pub use config::Config;
pub use error::{
    AgentError, AppError, ConfigError, NewsError, ReqwestErrorExt, VaultError, WeatherError,
};

use tracing_subscriber::EnvFilter;

/// Map a `LOG_LEVEL` value onto a tracing filter directive.
///
/// Accepts the usual level names case-insensitively; `WARNING` and
/// `CRITICAL` are accepted as aliases. Unknown values fall back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        "off" => "off",
        _ => "info",
    }
}

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins over `level` when set. Output goes to stderr so stdout
/// stays reserved for the run result.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(level)));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("Logging initialized at {}", level_directive(level));
}
