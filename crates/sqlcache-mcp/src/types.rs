//! Type definitions for MCP tools

use rmcp::ErrorData;
use rmcp::handler::server::wrapper::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cache::CacheStats;

/// Result type for MCP tool handlers returning structured JSON data
pub type ToolResult<T> = Result<Json<T>, ErrorData>;

/// One result row: column name to JSON scalar or null
pub type Row = Map<String, Value>;

/// Connection health check result
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PingResult {
    /// Connection status: "ok" or "error"
    #[schemars(description = "Connection status: ok or error")]
    pub status: String,
    /// Query latency in milliseconds
    #[schemars(description = "Query latency in milliseconds")]
    pub latency_ms: u64,
}

/// SQL statement execution result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueryResult {
    /// Column names in result set order
    #[schemars(description = "Column names in result set order")]
    pub columns: Vec<String>,
    /// Result rows keyed by column name
    #[schemars(description = "Result rows as objects keyed by column name")]
    pub rows: Vec<Row>,
    /// Number of rows returned
    #[schemars(description = "Number of rows returned")]
    pub row_count: usize,
    /// Rows changed by INSERT, UPDATE or DELETE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of rows inserted, updated, or deleted")]
    pub affected_rows: Option<u64>,
}

impl QueryResult {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
            affected_rows: None,
        }
    }

    /// Result of a statement that returns no rows
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Result of a DML statement
    #[must_use]
    pub fn affected(rows: u64) -> Self {
        Self {
            affected_rows: Some(rows),
            ..Self::empty()
        }
    }
}

/// Table column information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDescriptor {
    /// Column name
    #[schemars(description = "Column name")]
    pub name: String,
    /// Database data type (VARCHAR, INTEGER, DECIMAL, etc.)
    #[schemars(description = "Data type: VARCHAR, INTEGER, DECIMAL, TIMESTAMP, etc.")]
    pub data_type: String,
    /// Whether column accepts NULL values
    #[schemars(description = "Whether column accepts NULL values")]
    pub nullable: bool,
    /// Column default expression
    #[schemars(description = "Default value expression, if any")]
    pub default_value: Option<String>,
}

/// Table schema with columns and primary key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableSchema {
    /// Schema name
    #[schemars(description = "Schema containing the table")]
    pub schema_name: String,
    /// Table name
    #[schemars(description = "Table name")]
    pub table_name: String,
    /// Columns in ordinal order
    #[schemars(description = "List of column definitions in ordinal order")]
    pub columns: Vec<ColumnDescriptor>,
    /// Primary key column names in key order
    #[schemars(description = "Primary key column names in key order")]
    pub primary_key: Vec<String>,
}

impl TableSchema {
    /// Build a table schema; primary key names that are not columns are dropped.
    #[must_use]
    pub fn new(
        schema_name: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        primary_key: Vec<String>,
    ) -> Self {
        let schema_name = schema_name.into();
        let table_name = table_name.into();
        let (primary_key, unknown): (Vec<_>, Vec<_>) = primary_key
            .into_iter()
            .partition(|key| columns.iter().any(|c| &c.name == key));

        if !unknown.is_empty() {
            tracing::warn!(
                schema = %schema_name,
                table = %table_name,
                columns = ?unknown,
                "Primary key references unknown columns, dropping them"
            );
        }

        Self {
            schema_name,
            table_name,
            columns,
            primary_key,
        }
    }
}

/// Table reference returned by `list_tables`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableRef {
    /// Schema name
    #[schemars(description = "Schema containing the table")]
    pub schema_name: String,
    /// Table name
    #[schemars(description = "Table name")]
    pub table_name: String,
}

/// Result of the `list_tables` tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TableList {
    /// Tables ordered by schema, then name
    #[schemars(description = "Tables ordered by schema, then name")]
    pub tables: Vec<TableRef>,
    /// Number of tables returned
    #[schemars(description = "Number of tables returned")]
    pub count: usize,
}

impl From<Vec<TableRef>> for TableList {
    fn from(tables: Vec<TableRef>) -> Self {
        Self {
            count: tables.len(),
            tables,
        }
    }
}

/// Parameters for SQL query execution
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryParams {
    /// SQL statement to execute
    #[schemars(
        description = "SQL statement to execute. Write statements (INSERT, UPDATE, DELETE, DDL) require write operations to be enabled"
    )]
    pub sql: String,
    /// Whether a cached result may be returned
    #[serde(default = "default_use_cache")]
    #[schemars(
        description = "Return a cached result when available (default true). Set to false to always hit the database"
    )]
    pub use_cache: bool,
}

const fn default_use_cache() -> bool {
    true
}

/// Parameters for describing a table
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DescribeTableParams {
    /// Table name to describe
    #[schemars(
        description = "Name of the table to describe, optionally qualified as SCHEMA.TABLE. Example: 'EMPLOYEES', 'APP.ORDERS'"
    )]
    pub table: String,
    /// Optional schema name. If not provided, uses `CURRENT_SCHEMA`.
    #[serde(default)]
    #[schemars(
        description = "Schema name where the table is located. Leave empty to use CURRENT_SCHEMA"
    )]
    pub schema: Option<String>,
}

/// Result of the `clear_cache` tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClearCacheResult {
    /// Always "ok"
    #[schemars(description = "Operation status")]
    pub status: String,
    /// Entries removed across both caches
    #[schemars(description = "Number of cache entries removed")]
    pub cleared_entries: usize,
}

/// Counters of both caches held by the gateway
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct GatewayStats {
    /// Query result cache counters
    #[schemars(description = "Query result cache counters")]
    pub result_cache: CacheStats,
    /// Table schema cache counters
    #[schemars(description = "Table schema cache counters")]
    pub schema_cache: CacheStats,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn column(name: &str) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            data_type: "INTEGER".to_string(),
            nullable: false,
            default_value: None,
        }
    }

    #[test]
    fn test_query_result_row_count() {
        let mut row = Row::new();
        row.insert("ID".to_string(), json!(1));
        let result = QueryResult::new(vec!["ID".to_string()], vec![row.clone(), row]);

        assert_eq!(result.row_count, 2);
        assert_eq!(result.rows.len(), result.row_count);
        assert!(result.affected_rows.is_none());
    }

    #[test]
    fn test_query_result_affected() {
        let result = QueryResult::affected(3);
        assert_eq!(result.affected_rows, Some(3));
        assert_eq!(result.row_count, 0);
        assert!(result.columns.is_empty());
    }

    #[test]
    fn test_query_result_serialization_skips_affected_rows() {
        let json = serde_json::to_value(QueryResult::empty()).unwrap();
        assert!(json.get("affected_rows").is_none());
        assert_eq!(json["row_count"], 0);

        let json = serde_json::to_value(QueryResult::affected(7)).unwrap();
        assert_eq!(json["affected_rows"], 7);
    }

    #[test]
    fn test_query_result_rows_serialize_as_objects() {
        let mut row = Row::new();
        row.insert("NAME".to_string(), json!("alice"));
        row.insert("AGE".to_string(), Value::Null);
        let result = QueryResult::new(vec!["NAME".to_string(), "AGE".to_string()], vec![row]);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["rows"][0]["NAME"], "alice");
        assert!(json["rows"][0]["AGE"].is_null());
    }

    #[test]
    fn test_table_schema_keeps_known_primary_key() {
        let schema = TableSchema::new(
            "APP",
            "USERS",
            vec![column("ID"), column("TENANT")],
            vec!["TENANT".to_string(), "ID".to_string()],
        );
        assert_eq!(schema.primary_key, vec!["TENANT", "ID"]);
    }

    #[test]
    fn test_table_schema_drops_unknown_primary_key() {
        let schema = TableSchema::new(
            "APP",
            "USERS",
            vec![column("ID")],
            vec!["ID".to_string(), "GHOST".to_string()],
        );
        assert_eq!(schema.primary_key, vec!["ID"]);
        assert_eq!(schema.columns.len(), 1);
    }

    #[test]
    fn test_query_params_use_cache_defaults_true() {
        let params: QueryParams =
            serde_json::from_str(r#"{"sql": "SELECT 1 FROM DUMMY"}"#).unwrap();
        assert!(params.use_cache);

        let params: QueryParams =
            serde_json::from_str(r#"{"sql": "SELECT 1 FROM DUMMY", "use_cache": false}"#).unwrap();
        assert!(!params.use_cache);
    }

    #[test]
    fn test_describe_table_params_deserialization() {
        let params: DescribeTableParams = serde_json::from_str(r#"{"table": "USERS"}"#).unwrap();
        assert_eq!(params.table, "USERS");
        assert!(params.schema.is_none());

        let params: DescribeTableParams =
            serde_json::from_str(r#"{"table": "USERS", "schema": "APP"}"#).unwrap();
        assert_eq!(params.schema.as_deref(), Some("APP"));
    }

    #[test]
    fn test_gateway_stats_serialization() {
        let stats = GatewayStats::default();
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["result_cache"]["hits"], 0);
        assert_eq!(json["schema_cache"]["entries"], 0);
    }
}
