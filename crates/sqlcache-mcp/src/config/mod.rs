//! Configuration management
//!
//! Supports configuration loading with precedence: env > file > CLI > defaults.
//! Callers seed a [`ConfigBuilder`] with CLI values, then layer the file and
//! the environment on top of it.

mod builder;
mod env;
mod file;

pub use builder::{Config, ConfigBuilder, DEFAULT_QUERY_TIMEOUT, LoggingConfig};

use crate::Result;

/// Serializes tests that touch process environment
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Layer the first config file found and then the environment over `builder`
pub fn load_config(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(path) = file::find_config_file() {
        tracing::info!("Loading configuration from {}", path.display());
        builder = file::load_from_file(&path, builder)?;
    }

    env::load_from_env(builder)
}

/// Layer a specific config file and then the environment over `builder`
pub fn load_config_from_path(
    path: &std::path::Path,
    builder: ConfigBuilder,
) -> Result<ConfigBuilder> {
    let builder = file::load_from_file(path, builder)?;
    env::load_from_env(builder)
}
