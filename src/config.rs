//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines
//! constants for the HTTP bind address, response headers, logging defaults,
//! and host identity fallbacks. `AppConfig` is the root configuration struct.

use const_format::formatcp;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

// =============================================================================
// HTTP Server Defaults
// =============================================================================

/// Default bind host (all interfaces)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Default bind address, for help text and logs
pub const DEFAULT_BIND_ADDR: &str = formatcp!("{}:{}", DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT);

/// Seconds to wait for in-flight connections after a shutdown signal
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// HTTP Response Headers
// =============================================================================

/// Every payload carries a request-time timestamp, so nothing is cacheable.
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Response header carrying the per-request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Response Payloads
// =============================================================================

/// Liveness probe status
pub const HEALTH_STATUS: &str = "ok";

/// Service status reported by the root endpoint
pub const SERVICE_STATUS: &str = "healthy";

/// Service name reported by the root endpoint
pub const SERVICE_NAME: &str = "backend";

/// Greeting returned by the data endpoint
pub const DATA_MESSAGE: &str = "Hello from Backend!";

/// Fixed item list returned by the data endpoint
pub const DATA_ITEMS: [&str; 3] = ["Item 1", "Item 2", "Item 3"];

/// Hostname reported when the host identity provider fails (lenient mode)
pub const DEFAULT_FALLBACK_HOSTNAME: &str = "unknown";

/// chrono format for response timestamps: ISO-8601, microseconds, no offset
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME"));

/// Log filter used with --debug
pub const DEBUG_LOG_FILTER: &str = formatcp!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME"));

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Host identity fallback behavior
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }

    /// How long shutdown waits for in-flight connections before closing them.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }

    /// Resolve host and port into a bindable socket address.
    ///
    /// The host must be an IP literal (v4 or v6); names are not resolved.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            ConfigError::Validation(format!("Invalid http.host '{}': {}", self.host, e))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    /// Parsed log format. Unknown values are rejected by `AppConfig::validate`.
    pub fn log_format(&self) -> LogFormat {
        if self.format.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// What to do when the hostname cannot be read
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Placeholder reported instead of the real hostname
    #[serde(default = "IdentityConfig::default_fallback_hostname")]
    pub fallback_hostname: String,
    /// Fail the request with 500 instead of reporting the placeholder
    #[serde(default)]
    pub strict: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            fallback_hostname: Self::default_fallback_hostname(),
            strict: false,
        }
    }
}

impl IdentityConfig {
    fn default_fallback_hostname() -> String {
        DEFAULT_FALLBACK_HOSTNAME.to_string()
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.http.socket_addr()?;

        let format = self.logging.format.to_ascii_lowercase();
        if format != "text" && format != "json" {
            return Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}', expected \"text\" or \"json\"",
                self.logging.format
            )));
        }

        if self.identity.fallback_hostname.trim().is_empty() {
            return Err(ConfigError::Validation(
                "identity.fallback_hostname must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_bind_all_interfaces_on_5000() {
        let config = AppConfig::default();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 5000);
        assert_eq!(
            config.http.socket_addr().unwrap().to_string(),
            DEFAULT_BIND_ADDR
        );
        assert_eq!(config.logging.log_format(), LogFormat::Text);
        assert_eq!(config.identity.fallback_hostname, "unknown");
        assert!(!config.identity.strict);
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.http.shutdown_grace_seconds, DEFAULT_SHUTDOWN_GRACE_SECS);
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
            [http]
            host = "127.0.0.1"
            port = 8080
            shutdown_grace_seconds = 5

            [logging]
            format = "json"

            [identity]
            fallback_hostname = "anonymous"
            strict = true
            "#,
        );
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.http.shutdown_grace_seconds, 5);
        assert_eq!(config.logging.log_format(), LogFormat::Json);
        assert_eq!(config.identity.fallback_hostname, "anonymous");
        assert!(config.identity.strict);
    }

    #[test]
    fn test_shutdown_grace_from_config() {
        assert_eq!(
            HttpServerConfig::default().shutdown_grace(),
            Duration::from_secs(30)
        );
        let file = write_config("[http]\nshutdown_grace_seconds = 2\n");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.shutdown_grace(), Duration::from_secs(2));
    }

    #[test]
    fn test_ipv6_host() {
        let http = HttpServerConfig {
            host: "::1".to_string(),
            ..HttpServerConfig::default()
        };
        assert_eq!(http.socket_addr().unwrap().to_string(), "[::1]:5000");
    }

    #[test]
    fn test_rejects_hostname_as_bind_host() {
        let file = write_config("[http]\nhost = \"localhost\"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let file = write_config("[logging]\nformat = \"xml\"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_rejects_empty_fallback_hostname() {
        let file = write_config("[identity]\nfallback_hostname = \"  \"\n");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("[http]\nport = \"not a number\"\n");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config =
            AppConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml")).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.http.host, defaults.http.host);
        assert_eq!(config.http.port, defaults.http.port);
        assert_eq!(config.logging.format, defaults.logging.format);
        assert_eq!(
            config.identity.fallback_hostname,
            defaults.identity.fallback_hostname
        );
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load("/nonexistent/backend.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
