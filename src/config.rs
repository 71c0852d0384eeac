//! Runtime configuration for the board store and the HTTP gateway.

use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`GatewayConfig::base_url`].
pub const API_URL_ENV: &str = "TASKBOARD_API_URL";

/// Environment variable overriding [`GatewayConfig::timeout`], in milliseconds.
pub const API_TIMEOUT_ENV: &str = "TASKBOARD_API_TIMEOUT_MS";

/// Errors raised while reading configuration overrides.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An override was present but could not be parsed.
    #[error("invalid value '{value}' for {variable}")]
    InvalidValue {
        /// Variable name.
        variable: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Behaviour of the board store.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taskboard::config::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.search_debounce, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Tasks requested per page.
    pub page_size: u32,
    /// Quiet period after the last keystroke before a search is sent.
    pub search_debounce: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            search_debounce: Duration::from_millis(500),
        }
    }
}

impl BoardConfig {
    /// Creates a configuration with a short debounce, for tests running on
    /// wall-clock time.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            search_debounce: Duration::from_millis(20),
            ..Self::default()
        }
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the search debounce window.
    #[must_use]
    pub const fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }
}

/// Connection settings for the HTTP task backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api/tasks".to_owned(),
            timeout: Duration::from_millis(5000),
        }
    }
}

impl GatewayConfig {
    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds a configuration from defaults and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the timeout override is not
    /// a whole number of milliseconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from defaults and overrides supplied by
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the timeout override is not
    /// a whole number of milliseconds.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config.base_url = url.trim().to_owned();
        }
        if let Some(raw) = lookup(API_TIMEOUT_ENV) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    variable: API_TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_millis(millis);
        }
        Ok(config)
    }
}
