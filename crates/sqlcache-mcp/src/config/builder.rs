//! Configuration builder

use std::num::NonZeroUsize;
use std::time::Duration;

use url::Url;

use crate::Error;
use crate::cache::CacheConfig;

/// Default per-call database timeout
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub connection_url: Url,
    pub writes_enabled: bool,
    pub query_timeout: Duration,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

impl Config {
    #[must_use]
    pub const fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    #[must_use]
    pub const fn writes_enabled(&self) -> bool {
        self.writes_enabled
    }

    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    #[must_use]
    pub const fn cache(&self) -> &CacheConfig {
        &self.cache
    }

    /// Connection URL with the password masked, for logging
    #[must_use]
    pub fn redacted_url(&self) -> String {
        let mut url = self.connection_url.clone();
        if url.password().is_some() {
            let _ = url.set_password(Some("***"));
        }
        url.to_string()
    }
}

/// Log output configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub log_level: String,
    pub json_logs: bool,
}

/// Configuration builder with fluent API
#[derive(Debug)]
pub struct ConfigBuilder {
    connection_url: Option<Url>,
    writes_enabled: bool,
    query_timeout: Duration,
    cache: CacheConfig,
    logging: LoggingConfig,
}

impl ConfigBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connection_url: None,
            writes_enabled: false,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            cache: CacheConfig::new(),
            logging: LoggingConfig {
                log_level: String::new(),
                json_logs: false,
            },
        }
    }

    #[must_use]
    pub fn connection_url(mut self, url: Url) -> Self {
        self.connection_url = Some(url);
        self
    }

    /// Allow INSERT, UPDATE, DELETE, DDL and transaction statements
    #[must_use]
    pub const fn writes_enabled(mut self, enabled: bool) -> Self {
        self.writes_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache.enabled = enabled;
        self
    }

    /// Set the TTL shared by both caches
    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache.ttl = ttl;
        self
    }

    /// Set the result cache bound
    #[must_use]
    pub const fn cache_max_entries(mut self, max: NonZeroUsize) -> Self {
        self.cache.max_entries = max;
        self
    }

    /// Set the schema cache bound
    #[must_use]
    pub const fn schema_cache_max_entries(mut self, max: NonZeroUsize) -> Self {
        self.cache.schema_max_entries = max;
        self
    }

    #[must_use]
    pub fn log_level(mut self, level: String) -> Self {
        self.logging.log_level = level;
        self
    }

    #[must_use]
    pub const fn json_logs(mut self, enabled: bool) -> Self {
        self.logging.json_logs = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> crate::Result<Config> {
        let connection_url = self
            .connection_url
            .ok_or_else(|| Error::Config("connection_url is required".into()))?;

        if self.cache.ttl.is_zero() {
            return Err(Error::Config("cache TTL must be positive".into()));
        }

        if self.query_timeout.is_zero() {
            return Err(Error::Config("query timeout must be positive".into()));
        }

        let log_level = if self.logging.log_level.is_empty() {
            "info".to_string()
        } else {
            self.logging.log_level
        };

        Ok(Config {
            connection_url,
            writes_enabled: self.writes_enabled,
            query_timeout: self.query_timeout,
            cache: self.cache,
            logging: LoggingConfig {
                log_level,
                json_logs: self.logging.json_logs,
            },
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
