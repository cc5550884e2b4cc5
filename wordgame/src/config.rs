//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::time::Duration;

/// Environment variable holding the authority's base URL.
pub const GAME_API_URL: &str = "GAME_API_URL";
/// Environment variable holding the per-request timeout in seconds.
pub const GAME_REQUEST_TIMEOUT_SECS: &str = "GAME_REQUEST_TIMEOUT_SECS";
/// Environment variable controlling whether a session is requested on start.
pub const GAME_AUTOSTART: &str = "GAME_AUTOSTART";

/// Default capacity of the session actor's event inbox.
pub const DEFAULT_INBOX_CAPACITY: usize = 32;

/// Where and how to reach the remote game authority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityConfig {
    /// Base URL, e.g. `http://localhost:1337`. Never ends with `/`.
    pub base_url: String,
    /// Transport timeout applied to each request. `None` waits forever.
    pub request_timeout: Option<Duration>,
}

impl AuthorityConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: None,
        }
    }
}

/// Session driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Request a session as soon as the driver starts
    pub autostart: bool,
    /// Capacity of the event inbox
    pub inbox_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autostart: true,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub authority: AuthorityConfig,
    pub session: SessionConfig,
}

/// Values given on the command line, which win over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub autostart: Option<bool>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_lookup<F>(overrides: Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = overrides
            .base_url
            .or_else(|| lookup(GAME_API_URL))
            .ok_or_else(|| ConfigError::MissingRequired {
                var: GAME_API_URL.to_string(),
                hint: "Set it to the game server address, e.g. http://localhost:1337, or pass --server".to_string(),
            })?;

        let request_timeout_secs = match overrides.request_timeout_secs {
            Some(secs) => Some(secs),
            None => lookup(GAME_REQUEST_TIMEOUT_SECS)
                .map(|raw| {
                    raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                        var: GAME_REQUEST_TIMEOUT_SECS.to_string(),
                        reason: format!("'{raw}' is not a whole number of seconds"),
                    })
                })
                .transpose()?,
        };

        if request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                var: GAME_REQUEST_TIMEOUT_SECS.to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let autostart = overrides
            .autostart
            .unwrap_or_else(|| parse_or(lookup(GAME_AUTOSTART), true));

        let mut authority = AuthorityConfig::new(base_url);
        authority.request_timeout = request_timeout_secs.map(Duration::from_secs);

        let config = ClientConfig {
            authority,
            session: SessionConfig {
                autostart,
                ..SessionConfig::default()
            },
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// # Errors
    ///
    /// Returns error describing the first invalid setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.authority.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: GAME_API_URL.to_string(),
                reason: format!("'{url}' must start with http:// or https://"),
            });
        }

        if self.session.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "inbox_capacity".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_or<T>(raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}
