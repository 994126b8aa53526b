//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::identity::{format_timestamp, Clock, HostIdentity, SystemClock, SystemHostIdentity};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration and the two capabilities handlers read per request:
/// the host identity provider and the clock. Nothing in here is mutated after
/// start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub host: Arc<dyn HostIdentity>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates state backed by the operating system hostname and local clock.
    pub fn new(config: AppConfig) -> Self {
        Self::with_providers(config, Arc::new(SystemHostIdentity), Arc::new(SystemClock))
    }

    /// Creates state with explicit providers.
    pub fn with_providers(
        config: AppConfig,
        host: Arc<dyn HostIdentity>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            host,
            clock,
        }
    }

    /// Current hostname, applying the configured failure policy.
    ///
    /// In lenient mode a failed lookup yields `identity.fallback_hostname`;
    /// in strict mode the error is returned and the request fails with 500.
    pub fn hostname(&self) -> Result<String, AppError> {
        match self.host.hostname() {
            Ok(name) if !name.is_empty() => Ok(name),
            Ok(_) => self.hostname_fallback(None),
            Err(e) => self.hostname_fallback(Some(e)),
        }
    }

    fn hostname_fallback(&self, error: Option<std::io::Error>) -> Result<String, AppError> {
        let identity = &self.config.identity;
        if identity.strict {
            let error = error.unwrap_or_else(|| std::io::Error::other("empty hostname"));
            return Err(AppError::HostIdentity(error));
        }

        match &error {
            Some(e) => tracing::warn!(
                error = %e,
                fallback = %identity.fallback_hostname,
                "Hostname lookup failed, using fallback"
            ),
            None => tracing::warn!(
                fallback = %identity.fallback_hostname,
                "Hostname is empty, using fallback"
            ),
        }
        Ok(identity.fallback_hostname.clone())
    }

    /// Current time as an ISO-8601 string.
    pub fn timestamp(&self) -> String {
        format_timestamp(self.clock.now())
    }
}
