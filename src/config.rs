//! Server configuration resolved from environment variables.

use crate::enhancement::{
    adapters::gemini::DEFAULT_GEMINI_BASE_URL,
    services::{DEFAULT_FALLBACK_MODEL, DEFAULT_PRIMARY_MODEL, ModelRoute},
};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Bind host variable.
pub const HOST_VAR: &str = "TASKFLOW_HOST";
/// Bind port variable.
pub const PORT_VAR: &str = "PORT";
/// Provider credential variable.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Primary model variable.
pub const PRIMARY_MODEL_VAR: &str = "TASKFLOW_PRIMARY_MODEL";
/// Fallback model variable.
pub const FALLBACK_MODEL_VAR: &str = "TASKFLOW_FALLBACK_MODEL";
/// Provider base URL variable.
pub const PROVIDER_URL_VAR: &str = "TASKFLOW_PROVIDER_URL";
/// Provider timeout variable, in whole seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "TASKFLOW_REQUEST_TIMEOUT";

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while resolving configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Parse failure.
        reason: String,
    },
}

/// Resolved server configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server binds.
    pub bind: SocketAddr,
    /// Provider credential.
    pub api_key: String,
    /// Provider models per tier.
    pub models: ModelRoute,
    /// Provider base URL.
    pub provider_url: String,
    /// Upper bound on one provider call.
    pub request_timeout: Duration,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind", &self.bind)
            .field("api_key", &"<redacted>")
            .field("models", &self.models)
            .field("provider_url", &self.provider_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the API key is missing or a value is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the API key is missing or a value is
    /// malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
        };

        let host = parse_or(value(HOST_VAR), HOST_VAR, DEFAULT_HOST)?;
        let port = parse_or(value(PORT_VAR), PORT_VAR, DEFAULT_PORT)?;
        let timeout_secs = parse_or(
            value(REQUEST_TIMEOUT_VAR),
            REQUEST_TIMEOUT_VAR,
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: REQUEST_TIMEOUT_VAR,
                value: timeout_secs.to_string(),
                reason: "timeout must be at least one second".to_owned(),
            });
        }
        let api_key = value(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;

        Ok(Self {
            bind: SocketAddr::new(host, port),
            api_key,
            models: ModelRoute::new(
                value(PRIMARY_MODEL_VAR).unwrap_or_else(|| DEFAULT_PRIMARY_MODEL.to_owned()),
                value(FALLBACK_MODEL_VAR).unwrap_or_else(|| DEFAULT_FALLBACK_MODEL.to_owned()),
            ),
            provider_url: value(PROVIDER_URL_VAR)
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_owned()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value.parse().map_err(|err: T::Err| ConfigError::Invalid {
            name,
            reason: err.to_string(),
            value,
        })
    })
}
