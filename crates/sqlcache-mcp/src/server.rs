//! MCP server implementation

use std::fmt;
use std::sync::Arc;

use rmcp::handler::server::router::prompt::PromptRouter;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{
    GetPromptRequestParams, GetPromptResult, ListPromptsResult, ListResourceTemplatesResult,
    ListResourcesResult, PaginatedRequestParams, ReadResourceRequestParams, ReadResourceResult,
    Resource, ResourceContents, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{
    ErrorData, RoleServer, ServerHandler as RmcpServerHandler, prompt_handler, tool, tool_handler,
    tool_router,
};
use serde::Serialize;

use crate::constants::{JSON_MIME_TYPE, STATUS_OK};
use crate::gateway::QueryGateway;
use crate::resources::{TableUri, all_tables_resource, table_resource, table_resource_template};
use crate::types::{
    ClearCacheResult, DescribeTableParams, GatewayStats, PingResult, QueryParams, QueryResult,
    TableList, TableSchema, ToolResult,
};
use crate::validation::{parse_qualified_name, validate_identifier};

pub struct ServerHandler {
    gateway: Arc<QueryGateway>,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

impl Clone for ServerHandler {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }
}

impl fmt::Debug for ServerHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerHandler")
            .field("gateway", &self.gateway)
            .field("tool_router", &"<ToolRouter>")
            .field("prompt_router", &"<PromptRouter>")
            .finish()
    }
}

impl ServerHandler {
    pub fn new(gateway: QueryGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &QueryGateway {
        &self.gateway
    }

    /// One resource per table plus `table://*`.
    ///
    /// When the catalog cannot be read only `table://*` is offered.
    async fn table_resources(&self) -> Vec<Resource> {
        let mut resources = match self.gateway.list_tables().await {
            Ok(tables) => tables.iter().map(table_resource).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list tables for resources");
                Vec::new()
            }
        };
        resources.push(all_tables_resource());
        resources
    }

    async fn read_table_resource(&self, uri: &str) -> Result<ReadResourceResult, ErrorData> {
        let text = match TableUri::parse(uri).map_err(ErrorData::from)? {
            TableUri::All => {
                let tables = self.gateway.list_tables().await.map_err(ErrorData::from)?;
                to_json(&TableList::from(tables))?
            }
            TableUri::Table { schema, table } => {
                let described = self
                    .gateway
                    .describe_table(&schema, &table, true)
                    .await
                    .map_err(ErrorData::from)?;
                to_json(&*described)?
            }
        };

        tracing::debug!(resource = %uri, bytes = text.len(), "Resource read");

        Ok(ReadResourceResult::new(vec![
            ResourceContents::text(text, uri).with_mime_type(JSON_MIME_TYPE),
        ]))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ErrorData> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(format!("Serialization error: {e}"), None))
}

#[tool_router]
impl ServerHandler {
    #[tool(description = "Check database connection health")]
    async fn ping(&self) -> ToolResult<PingResult> {
        let start = std::time::Instant::now();

        self.gateway.ping().await.map_err(ErrorData::from)?;

        Ok(Json(PingResult {
            status: STATUS_OK.to_string(),
            latency_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        }))
    }

    #[tool(
        description = "Execute a SQL statement. Results of read-only statements are cached; write statements clear the cache and require write operations to be enabled"
    )]
    async fn query(&self, Parameters(params): Parameters<QueryParams>) -> ToolResult<QueryResult> {
        let result = self
            .gateway
            .query(&params.sql, params.use_cache)
            .await
            .map_err(|e| {
                tracing::debug!(tool = "query", error = %e, "Query failed");
                ErrorData::from(e)
            })?;

        tracing::debug!(
            tool = "query",
            row_count = result.row_count,
            columns = result.columns.len(),
            "Query completed"
        );

        Ok(Json(Arc::unwrap_or_clone(result)))
    }

    #[tool(description = "List tables outside the system schemas")]
    async fn list_tables(&self) -> ToolResult<TableList> {
        let tables = self.gateway.list_tables().await.map_err(ErrorData::from)?;

        tracing::debug!(
            tool = "list_tables",
            count = tables.len(),
            "Query completed"
        );
        Ok(Json(TableList::from(tables)))
    }

    #[tool(description = "Get column definitions and primary key of a table")]
    async fn describe_table(
        &self,
        Parameters(params): Parameters<DescribeTableParams>,
    ) -> ToolResult<TableSchema> {
        let (schema, table) = parse_qualified_name(&params.table, params.schema.as_deref())
            .map_err(ErrorData::from)?;
        validate_identifier(&table, "table name").map_err(ErrorData::from)?;

        let schema = match schema {
            Some(schema) => schema,
            None => self
                .gateway
                .current_schema()
                .await
                .map_err(ErrorData::from)?,
        };
        validate_identifier(&schema, "schema name").map_err(ErrorData::from)?;

        let described = self
            .gateway
            .describe_table(&schema, &table, true)
            .await
            .map_err(ErrorData::from)?;

        tracing::debug!(
            tool = "describe_table",
            schema = %schema,
            table = %table,
            columns = described.columns.len(),
            "Query completed"
        );

        Ok(Json(Arc::unwrap_or_clone(described)))
    }

    #[tool(description = "Remove every cached query result and table schema")]
    async fn clear_cache(&self) -> ToolResult<ClearCacheResult> {
        let cleared_entries = self.gateway.clear();

        tracing::info!(tool = "clear_cache", cleared_entries, "Cache cleared");

        Ok(Json(ClearCacheResult {
            status: STATUS_OK.to_string(),
            cleared_entries,
        }))
    }

    #[tool(description = "Hit, miss, eviction and size counters of the query and schema caches")]
    async fn cache_stats(&self) -> ToolResult<GatewayStats> {
        Ok(Json(self.gateway.stats()))
    }
}

#[tool_handler]
#[prompt_handler]
impl RmcpServerHandler for ServerHandler {
    fn get_info(&self) -> ServerInfo {
        let mode = if self.gateway.writes_enabled() {
            "Write statements are enabled."
        } else {
            "The server is read-only; write statements are rejected."
        };

        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
        )
        .with_instructions(format!(
            "MCP server for SAP HANA with a query result cache. \
             Provides tools to query and explore the database, table schemas as \
             table://<schema>/<table> resources and query prompts. {mode}"
        ))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult::with_all_items(
            self.table_resources().await,
        ))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        Ok(ListResourceTemplatesResult::with_all_items(vec![
            table_resource_template(),
        ]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        self.read_table_resource(&request.uri).await
    }
}
