//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, plus the typed settings
//! for the dispatcher and the server.

use url::Url;
use std::time::Duration;
use thiserror::Error;

/// Health check URL hit when no target is configured
pub const DEFAULT_TARGET: &str = "https://api.shubhamiitbhu.in/user/health";

/// Batch size used when no count is configured
pub const DEFAULT_COUNT: usize = 100;

/// Default server port
pub const DEFAULT_PORT: u16 = 3000;

/// Default server bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/burstcheck.db";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Target is not a valid absolute URL
    #[error("Invalid target URL '{url}': {source}")]
    InvalidTarget {
        /// Raw value as given
        url: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// Target uses a scheme the transport cannot speak
    #[error("Unsupported target scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    /// Timeout of zero seconds was requested
    #[error("Timeout must be at least 1 second")]
    ZeroTimeout,

    /// Environment variable is set but does not parse
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnv {
        /// Variable that carried the value (new or deprecated name)
        name: String,
        /// Raw value as set
        value: String,
    },
}

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use burstcheck::config::get_env_with_fallback;
///
/// let target = get_env_with_fallback("BURSTCHECK_TARGET", "TARGET_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `Ok(None)` if neither variable is set. A set value that does not
/// parse is an error naming the variable it came from.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
) -> Result<Option<T>, ConfigError> {
    let name = if std::env::var(new_name).is_ok() {
        new_name
    } else {
        old_name
    };
    match get_env_with_fallback(new_name, old_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                name: name.to_string(),
                value,
            }),
    }
}

/// Parse and validate a dispatch target
pub fn parse_target(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidTarget {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

/// Settings for one dispatcher run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// URL every slot sends its GET to
    pub target: Url,
    /// Number of slots in the batch
    pub count: usize,
    /// Per-request timeout enforced by the transport. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl DispatchConfig {
    /// Build a config from raw values, validating the target and timeout.
    pub fn new(target: &str, count: usize, timeout_secs: Option<u64>) -> Result<Self, ConfigError> {
        let timeout = match timeout_secs {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };
        Ok(Self {
            target: parse_target(target)?,
            count,
            timeout,
        })
    }

    /// Fill in a dispatcher config from explicit values, then the
    /// environment, then the defaults.
    ///
    /// Each setting is read from `BURSTCHECK_*` first and the deprecated
    /// name second. A set variable that does not parse is an error, never
    /// a silent default.
    pub fn resolve(
        target: Option<&str>,
        count: Option<usize>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let target = match target {
            Some(target) => target.to_string(),
            None => get_env_with_fallback("BURSTCHECK_TARGET", "TARGET_URL")
                .unwrap_or_else(|| DEFAULT_TARGET.to_string()),
        };
        let count = match count {
            Some(count) => count,
            None => get_env_with_fallback_parse("BURSTCHECK_COUNT", "REQUEST_COUNT")?
                .unwrap_or(DEFAULT_COUNT),
        };
        let timeout_secs = match timeout_secs {
            Some(secs) => Some(secs),
            None => get_env_with_fallback_parse("BURSTCHECK_TIMEOUT_SECS", "TIMEOUT_SECS")?,
        };
        Self::new(&target, count, timeout_secs)
    }
}

/// Settings for the health/test server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
