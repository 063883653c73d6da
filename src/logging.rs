//! Logger bootstrap for the binary.
//!
//! Library code only emits through the `log` facade; nothing is printed until
//! [`init_logging`] installs `env_logger`.

use crate::config::ConfigError;
use env_logger::{Builder, Env, Target};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maps a user supplied level to the canonical `log` filter name.
pub fn normalize_level(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Installs the process logger, writing to stderr.
///
/// An explicit `level` wins over `RUST_LOG`; with neither, [`DEFAULT_LOG_LEVEL`]
/// applies. Returns `false` when a logger was already installed, which is not
/// an error.
pub fn init_logging(level: Option<&str>) -> Result<bool, ConfigError> {
    let mut builder = match level {
        Some(level) => {
            let level = normalize_level(level).ok_or_else(|| {
                ConfigError::InvalidConfig(format!(
                    "unsupported log level `{}`; expected trace|debug|info|warn|error",
                    level.trim()
                ))
            })?;
            let mut builder = Builder::new();
            builder.parse_filters(level);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_LEVEL)),
    };

    builder.format_timestamp_millis().target(Target::Stderr);
    Ok(builder.try_init().is_ok())
}
