//! TOML configuration file loading

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::builder::ConfigBuilder;
use crate::Result;

/// Configuration file locations checked in order
const CONFIG_PATHS: &[&str] = &[
    "./sqlcache-mcp.toml",
    "~/.config/sqlcache-mcp/config.toml",
    "/etc/sqlcache-mcp/config.toml",
];

/// Find the first existing configuration file
pub fn find_config_file() -> Option<PathBuf> {
    for path_str in CONFIG_PATHS {
        let path = if path_str.starts_with('~') {
            if let Ok(home) = std::env::var("HOME") {
                PathBuf::from(path_str.replacen('~', &home, 1))
            } else {
                continue;
            }
        } else {
            PathBuf::from(path_str)
        };

        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path, builder: ConfigBuilder) -> Result<ConfigBuilder> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::Error::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    let file_config: FileConfig = toml::from_str(&content).map_err(|e| {
        crate::Error::Config(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })?;

    apply_file_config(builder, file_config)
}

fn apply_file_config(mut builder: ConfigBuilder, config: FileConfig) -> Result<ConfigBuilder> {
    if let Some(conn) = config.connection
        && let Some(url_str) = conn.url
    {
        let url = Url::parse(&url_str)
            .map_err(|e| crate::Error::Config(format!("Invalid connection URL: {e}")))?;
        builder = builder.connection_url(url);
    }

    if let Some(sec) = config.security {
        if let Some(enabled) = sec.writes_enabled {
            builder = builder.writes_enabled(enabled);
        }

        if let Some(timeout) = sec.query_timeout_secs.filter(|&t| t > 0) {
            builder = builder.query_timeout(Duration::from_secs(timeout));
        }
    }

    if let Some(cache) = config.cache {
        if let Some(enabled) = cache.enabled {
            builder = builder.cache_enabled(enabled);
        }

        if let Some(ttl) = cache.ttl_secs.filter(|&t| t > 0) {
            builder = builder.cache_ttl(Duration::from_secs(ttl));
        }

        if let Some(max) = cache.max_entries.and_then(NonZeroUsize::new) {
            builder = builder.cache_max_entries(max);
        }

        if let Some(max) = cache.schema_max_entries.and_then(NonZeroUsize::new) {
            builder = builder.schema_cache_max_entries(max);
        }
    }

    if let Some(obs) = config.observability {
        if let Some(level) = obs.log_level {
            builder = builder.log_level(level);
        }

        if let Some(json) = obs.json_logs {
            builder = builder.json_logs(json);
        }
    }

    Ok(builder)
}

/// Root configuration file structure
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    connection: Option<ConnectionConfig>,
    security: Option<SecurityConfig>,
    cache: Option<CacheFileConfig>,
    observability: Option<ObservabilityConfig>,
}

#[derive(Debug, Deserialize)]
struct ConnectionConfig {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SecurityConfig {
    writes_enabled: Option<bool>,
    query_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CacheFileConfig {
    enabled: Option<bool>,
    ttl_secs: Option<u64>,
    max_entries: Option<usize>,
    schema_max_entries: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ObservabilityConfig {
    log_level: Option<String>,
    json_logs: Option<bool>,
}
