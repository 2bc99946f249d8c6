//! Query result and schema caches
//!
//! Two bounded TTL stores sit in front of the database:
//!
//! - the result cache, keyed by [`QueryKey`] (SHA-256 of the whitespace-normalized
//!   statement), holding results of read-only statements;
//! - the schema cache, keyed by [`TableKey`] (`schema.table`), holding table
//!   descriptors.
//!
//! Both are owned by [`QueryGateway`](crate::gateway::QueryGateway), which clears
//! them together after every successful mutating statement. A write cannot be
//! mapped to the cached reads it affects, so invalidation is never selective.
//!
//! # Staleness
//!
//! TTL is absolute from insertion and checked lazily on lookup. Changes made to
//! the database by other clients are not observed until the entry expires.

mod config;
mod key;
mod store;

pub use config::{CacheConfig, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
pub use key::{QueryKey, TableKey, normalize_whitespace};
pub use store::{CacheStats, TtlCache};

use std::sync::Arc;

use crate::types::{QueryResult, TableSchema};

/// Cache of read-only statement results
pub type ResultCache = TtlCache<QueryKey, Arc<QueryResult>>;

/// Cache of table descriptors
pub type SchemaCache = TtlCache<TableKey, Arc<TableSchema>>;

/// Create the result cache described by `config`
#[must_use]
pub fn create_result_cache(config: &CacheConfig) -> ResultCache {
    if config.enabled {
        TtlCache::new("query", config.ttl, config.max_entries)
    } else {
        TtlCache::disabled("query")
    }
}

/// Create the schema cache described by `config`
#[must_use]
pub fn create_schema_cache(config: &CacheConfig) -> SchemaCache {
    if config.enabled {
        TtlCache::new("schema", config.ttl, config.schema_max_entries)
    } else {
        TtlCache::disabled("schema")
    }
}
