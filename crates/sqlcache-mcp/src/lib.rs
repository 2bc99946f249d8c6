//! MCP server for SAP HANA with a query result and schema cache

pub mod cache;
pub mod classify;
pub mod config;
mod constants;
pub mod database;
mod error;
pub mod gateway;
mod helpers;
pub mod observability;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod transport;
pub mod types;
mod validation;

pub use cache::{CacheConfig, CacheStats, QueryKey, TableKey, TtlCache};
pub use classify::{StatementKind, classify};
pub use config::{Config, ConfigBuilder, LoggingConfig};
pub use database::{Database, HanaDatabase};
pub use error::{Error, Result};
pub use gateway::QueryGateway;
pub use server::ServerHandler;
pub use types::*;
