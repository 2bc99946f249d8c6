//! Cached query path between the MCP tools and the database
//!
//! Every statement is classified first. Reads may be answered from the result
//! cache; writes are refused unless enabled, and a successful write empties
//! both caches before its result is returned.

use std::sync::Arc;

use crate::cache::{
    CacheConfig, QueryKey, ResultCache, SchemaCache, TableKey, create_result_cache,
    create_schema_cache,
};
use crate::classify::{StatementKind, classify};
use crate::database::Database;
use crate::types::{GatewayStats, QueryResult, TableRef, TableSchema};
use crate::{Error, Result};

/// Owns the result and schema caches and the database they front
#[derive(Debug)]
pub struct QueryGateway {
    db: Arc<dyn Database>,
    results: ResultCache,
    schemas: SchemaCache,
    writes_enabled: bool,
}

impl QueryGateway {
    #[must_use]
    pub fn new(db: Arc<dyn Database>, cache: &CacheConfig, writes_enabled: bool) -> Self {
        Self {
            db,
            results: create_result_cache(cache),
            schemas: create_schema_cache(cache),
            writes_enabled,
        }
    }

    /// Whether write statements are allowed by configuration
    #[must_use]
    pub const fn writes_enabled(&self) -> bool {
        self.writes_enabled
    }

    /// Run a statement under the configured write policy
    pub async fn query(&self, sql: &str, use_cache: bool) -> Result<Arc<QueryResult>> {
        self.run(sql, use_cache, self.writes_enabled).await
    }

    /// Run a statement through the cache.
    ///
    /// Reads are served from the result cache when `use_cache` is set and the
    /// cache is enabled; a miss executes and stores the result unless a write
    /// cleared the cache in the meantime. Failed statements are never cached. Writes bypass the cache entirely and clear both caches
    /// once they succeed.
    pub async fn run(
        &self,
        sql: &str,
        use_cache: bool,
        writes_enabled: bool,
    ) -> Result<Arc<QueryResult>> {
        let kind = classify(sql);

        match kind {
            StatementKind::Write => self.run_write(sql, writes_enabled).await,
            StatementKind::Read => self.run_read(sql, use_cache).await,
        }
    }

    async fn run_write(&self, sql: &str, writes_enabled: bool) -> Result<Arc<QueryResult>> {
        if !writes_enabled {
            tracing::warn!(statement.kind = "write", "Write statement refused");
            return Err(Error::WritesDisabled);
        }

        let result = self.db.execute(sql, StatementKind::Write).await?;
        let cleared = self.clear();

        tracing::info!(
            statement.kind = "write",
            affected_rows = ?result.affected_rows,
            cache.cleared = cleared,
            "Write statement executed, caches invalidated"
        );

        Ok(Arc::new(result))
    }

    async fn run_read(&self, sql: &str, use_cache: bool) -> Result<Arc<QueryResult>> {
        let caching = use_cache && self.results.is_enabled();
        let key = caching.then(|| QueryKey::from_sql(sql));

        if let Some(key) = &key
            && let Some(hit) = self.results.get(key)
        {
            return Ok(hit);
        }

        let generation = self.results.generation();
        let result = Arc::new(self.db.execute(sql, StatementKind::Read).await?);

        if let Some(key) = key {
            self.results
                .put_if_generation(key, Arc::clone(&result), generation);
        }

        tracing::debug!(
            statement.kind = "read",
            cached = caching,
            row_count = result.row_count,
            "Read statement executed"
        );

        Ok(result)
    }

    /// Column metadata of `schema.table`, from the schema cache when possible.
    ///
    /// A missing table is reported as `Error::TableNotFound` and not remembered.
    /// A description fetched while a write cleared the caches is returned but
    /// not stored.
    pub async fn describe_table(
        &self,
        schema: &str,
        table: &str,
        use_cache: bool,
    ) -> Result<Arc<TableSchema>> {
        let caching = use_cache && self.schemas.is_enabled();
        let key = caching.then(|| TableKey::new(schema, table));

        if let Some(key) = &key
            && let Some(hit) = self.schemas.get(key)
        {
            return Ok(hit);
        }

        let generation = self.schemas.generation();
        let described = Arc::new(self.db.describe_table(schema, table).await?);

        if let Some(key) = key {
            self.schemas
                .put_if_generation(key, Arc::clone(&described), generation);
        }

        Ok(described)
    }

    /// User tables; always read from the catalog
    pub async fn list_tables(&self) -> Result<Vec<TableRef>> {
        self.db.list_tables().await
    }

    pub async fn current_schema(&self) -> Result<String> {
        self.db.current_schema().await
    }

    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await
    }

    /// Empty both caches, returning how many entries were removed
    pub fn clear(&self) -> usize {
        self.results.clear() + self.schemas.clear()
    }

    #[must_use]
    pub fn stats(&self) -> GatewayStats {
        GatewayStats {
            result_cache: self.results.stats(),
            schema_cache: self.schemas.stats(),
        }
    }
}
