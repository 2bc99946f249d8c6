//! Prompt templates for common query patterns

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{PromptMessage, PromptMessageRole};
use rmcp::{ErrorData, prompt, prompt_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::server::ServerHandler;

/// Rows shown by `query-example` when no limit is given
pub const DEFAULT_EXAMPLE_LIMIT: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryExampleArgs {
    #[schemars(description = "Table to query, optionally qualified as SCHEMA.TABLE")]
    pub table_name: String,
    /// Prompt arguments arrive as strings
    #[serde(default)]
    #[schemars(description = "Number of rows to return (default 10)")]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SchemaQueryArgs {
    #[schemars(description = "Table whose structure to inspect")]
    pub table_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JoinQueryArgs {
    #[schemars(description = "First table")]
    pub table1: String,
    #[schemars(description = "Second table")]
    pub table2: String,
    #[schemars(description = "Join condition, e.g. a.ID = b.A_ID")]
    pub join_condition: String,
}

/// Parse the `limit` argument; absent or blank means the default.
pub fn parse_limit(limit: Option<&str>) -> Result<u32, ErrorData> {
    match limit.map(str::trim) {
        None | Some("") => Ok(DEFAULT_EXAMPLE_LIMIT),
        Some(raw) => match raw.parse::<u32>() {
            Ok(0) | Err(_) => Err(ErrorData::invalid_params(
                format!("limit must be a positive integer, got '{raw}'"),
                None,
            )),
            Ok(n) => Ok(n),
        },
    }
}

pub fn query_example_text(table: &str, limit: u32) -> String {
    format!(
        "Show the first {limit} rows of table {table}.\n\n\
         Run this with the `query` tool:\n\n\
         SELECT * FROM {table} LIMIT {limit}\n\n\
         Repeated reads are answered from the result cache; pass use_cache = false \
         to force a fresh read."
    )
}

pub fn schema_query_text(table: &str) -> String {
    format!(
        "Describe the structure of table {table}: its columns, data types, nullability, \
         defaults and primary key.\n\n\
         Use the `describe_table` tool with table = \"{table}\", or read the \
         table://<schema>/<table> resource."
    )
}

pub fn join_query_text(table1: &str, table2: &str, join_condition: &str) -> String {
    format!(
        "Join {table1} with {table2} on {join_condition}.\n\n\
         Check both tables with `describe_table` first, then run with the `query` tool:\n\n\
         SELECT *\n  FROM {table1}\n  JOIN {table2} ON {join_condition}"
    )
}

#[prompt_router(vis = "pub(crate)")]
impl ServerHandler {
    #[prompt(
        name = "query-example",
        description = "Example SQL query returning the first N rows of a table"
    )]
    async fn query_example(
        &self,
        Parameters(args): Parameters<QueryExampleArgs>,
    ) -> Result<Vec<PromptMessage>, ErrorData> {
        let limit = parse_limit(args.limit.as_deref())?;
        Ok(vec![PromptMessage::new_text(
            PromptMessageRole::User,
            query_example_text(&args.table_name, limit),
        )])
    }

    #[prompt(
        name = "schema-query",
        description = "Inspect the structure of a table"
    )]
    async fn schema_query(
        &self,
        Parameters(args): Parameters<SchemaQueryArgs>,
    ) -> Vec<PromptMessage> {
        vec![PromptMessage::new_text(
            PromptMessageRole::User,
            schema_query_text(&args.table_name),
        )]
    }

    #[prompt(name = "join-query", description = "Example query joining two tables")]
    async fn join_query(&self, Parameters(args): Parameters<JoinQueryArgs>) -> Vec<PromptMessage> {
        vec![PromptMessage::new_text(
            PromptMessageRole::User,
            join_query_text(&args.table1, &args.table2, &args.join_condition),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit_default() {
        assert_eq!(parse_limit(None).unwrap(), DEFAULT_EXAMPLE_LIMIT);
        assert_eq!(parse_limit(Some("  ")).unwrap(), DEFAULT_EXAMPLE_LIMIT);
    }

    #[test]
    fn test_parse_limit_value() {
        assert_eq!(parse_limit(Some("25")).unwrap(), 25);
        assert_eq!(parse_limit(Some(" 5 ")).unwrap(), 5);
    }

    #[test]
    fn test_parse_limit_rejects_invalid() {
        assert!(parse_limit(Some("0")).is_err());
        assert!(parse_limit(Some("-3")).is_err());
        let err = parse_limit(Some("ten")).unwrap_err();
        assert!(err.message.contains("ten"));
    }

    #[test]
    fn test_query_example_text() {
        let text = query_example_text("APP.USERS", 5);
        assert!(text.contains("SELECT * FROM APP.USERS LIMIT 5"));
        assert!(text.contains("`query`"));
    }

    #[test]
    fn test_schema_query_text() {
        let text = schema_query_text("ORDERS");
        assert!(text.contains("describe_table"));
        assert!(text.contains("\"ORDERS\""));
    }

    #[test]
    fn test_join_query_text() {
        let text = join_query_text("ORDERS o", "USERS u", "o.USER_ID = u.ID");
        assert!(text.contains("FROM ORDERS o"));
        assert!(text.contains("JOIN USERS u ON o.USER_ID = u.ID"));
    }
}
