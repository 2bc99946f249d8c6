//! Database collaborator
//!
//! The gateway talks to the database only through [`Database`]. The production
//! implementation is [`HanaDatabase`]; tests substitute an in-memory double.

mod guard;
mod hana;

pub use guard::QueryGuard;
pub use hana::HanaDatabase;

use std::fmt;

use async_trait::async_trait;

use crate::Result;
use crate::classify::StatementKind;
use crate::types::{QueryResult, TableRef, TableSchema};

/// Operations the server needs from a database connection.
///
/// Implementations never retry; every error is returned to the caller as is.
#[async_trait]
pub trait Database: Send + Sync + fmt::Debug {
    /// Run one statement. `kind` is the classification the gateway already made.
    async fn execute(&self, sql: &str, kind: StatementKind) -> Result<QueryResult>;

    /// Column and primary key metadata of one table.
    ///
    /// Returns `Error::TableNotFound` when the catalog has no columns for it.
    async fn describe_table(&self, schema: &str, table: &str) -> Result<TableSchema>;

    /// Tables outside the system schemas
    async fn list_tables(&self) -> Result<Vec<TableRef>>;

    /// Schema used for unqualified names
    async fn current_schema(&self) -> Result<String>;

    /// Round trip a trivial statement
    async fn ping(&self) -> Result<()>;
}
