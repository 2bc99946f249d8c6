//! Cache configuration types

use std::num::NonZeroUsize;
use std::time::Duration;

/// Default entry time-to-live: 5 minutes
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default bound on cached query results
pub const DEFAULT_MAX_ENTRIES: NonZeroUsize = NonZeroUsize::new(128).unwrap();

/// Cache configuration
///
/// Shared by the result cache and the schema cache. Both use the same TTL;
/// their size bounds are configured independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Whether caching is enabled
    pub enabled: bool,
    /// Absolute lifetime of an entry, measured from insertion
    pub ttl: Duration,
    /// Maximum number of cached query results
    pub max_entries: NonZeroUsize,
    /// Maximum number of cached table descriptors
    pub schema_max_entries: NonZeroUsize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: true,
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
            schema_max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Configuration with caching turned off
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_entries.get(), 128);
        assert_eq!(config.schema_max_entries.get(), 128);
    }

    #[test]
    fn test_cache_config_new_matches_default() {
        assert_eq!(CacheConfig::new(), CacheConfig::default());
    }

    #[test]
    fn test_cache_config_disabled() {
        let config = CacheConfig::disabled();
        assert!(!config.enabled);
        assert_eq!(config.ttl, DEFAULT_TTL);
    }
}
