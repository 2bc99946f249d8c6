use std::time::Duration;

use rmcp::ErrorData;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Connection error: {0}")]
    Connection(#[from] hdbconnect::HdbError),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Write operations are disabled. Set DANGEROUSLY_ALLOW_WRITE_OPS=true to enable them")]
    WritesDisabled,

    #[error("Query timeout after {0:?}")]
    QueryTimeout(Duration),

    #[error("Table not found: {schema}.{table}")]
    TableNotFound { schema: String, table: String },

    #[error("{0}")]
    InvalidIdentifier(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unknown resource URI: {0}")]
    UnknownResource(String),
}

impl Error {
    pub fn table_not_found(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self::TableNotFound {
            schema: schema.into(),
            table: table.into(),
        }
    }

    #[must_use]
    pub const fn is_writes_disabled(&self) -> bool {
        matches!(self, Self::WritesDisabled)
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::QueryTimeout(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TableNotFound { .. })
    }

    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    /// Failure reported by the database while running a statement
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(
            self,
            Self::Query(_) | Self::Connection(_) | Self::QueryTimeout(_)
        )
    }
}

/// Convert our Error type to rmcp `ErrorData`
impl From<Error> for ErrorData {
    fn from(err: Error) -> Self {
        match err {
            Error::Connection(e) => {
                Self::internal_error(format!("Database connection error: {e}"), None)
            }
            Error::Query(msg) => Self::internal_error(format!("Query error: {msg}"), None),
            Error::Config(msg) => Self::invalid_params(format!("Configuration error: {msg}"), None),
            Error::WritesDisabled => Self::invalid_params(
                "Write operations are disabled. Set DANGEROUSLY_ALLOW_WRITE_OPS=true to enable them",
                None,
            ),
            Error::QueryTimeout(duration) => {
                Self::internal_error(format!("Query timeout after {duration:?}"), None)
            }
            Error::TableNotFound { schema, table } => {
                Self::invalid_params(format!("Table not found: {schema}.{table}"), None)
            }
            Error::InvalidIdentifier(msg) => Self::invalid_params(msg, None),
            Error::Transport(msg) => Self::internal_error(format!("Transport error: {msg}"), None),
            Error::UnknownResource(uri) => {
                Self::resource_not_found(format!("Unknown resource URI: {uri}"), None)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
