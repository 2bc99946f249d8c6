//! SAP HANA implementation of [`Database`] over `hdbconnect_async`

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use hdbconnect_async::{Connection, HdbValue};

use super::{Database, QueryGuard};
use crate::classify::{StatementKind, leading_keyword};
use crate::constants::{
    CURRENT_SCHEMA_QUERY, DESCRIBE_COLUMNS_TEMPLATE, HEALTH_CHECK_QUERY, LIST_TABLES_QUERY,
    PRIMARY_KEY_TEMPLATE, SQL_TRUE, table_query,
};
use crate::helpers::{hdb_value_to_json, value_as_string};
use crate::types::{ColumnDescriptor, QueryResult, Row, TableRef, TableSchema};
use crate::validation::validate_identifier;
use crate::{Error, Result};

/// Statements whose affected row count is reported
const DML_KEYWORDS: &[&str] = &["INSERT", "UPDATE", "DELETE"];

/// One HANA connection shared by all tool calls
pub struct HanaDatabase {
    conn: Connection,
    guard: QueryGuard,
}

impl fmt::Debug for HanaDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HanaDatabase")
            .field("conn", &"<Connection>")
            .field("guard", &self.guard)
            .finish()
    }
}

impl HanaDatabase {
    /// Open the connection; the timeout also bounds the connect itself.
    pub async fn connect(url: &str, query_timeout: Duration) -> Result<Self> {
        let guard = QueryGuard::new(query_timeout);
        let conn = guard.execute(Connection::new(url.to_string())).await?;
        Ok(Self { conn, guard })
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Vec<HdbValue<'static>>>> {
        let result_set = self.guard.execute(self.conn.query(sql)).await?;
        let rows = self.guard.execute(result_set.into_rows()).await?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect())
    }

    async fn run_query(&self, sql: &str) -> Result<QueryResult> {
        let result_set = self.guard.execute(self.conn.query(sql)).await?;

        let columns: Vec<String> = result_set
            .metadata()
            .iter()
            .map(|col| col.columnname().to_string())
            .collect();

        let all_rows = self.guard.execute(result_set.into_rows()).await?;

        let rows: Vec<Row> = all_rows
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(|v| hdb_value_to_json(&v)))
                    .collect()
            })
            .collect();

        Ok(QueryResult::new(columns, rows))
    }

    async fn run_write(&self, sql: &str) -> Result<QueryResult> {
        let keyword = leading_keyword(sql).unwrap_or_default();
        if DML_KEYWORDS.contains(&keyword.as_str()) {
            let affected = self.guard.execute(self.conn.dml(sql)).await?;
            Ok(QueryResult::affected(
                u64::try_from(affected).unwrap_or(u64::MAX),
            ))
        } else {
            self.guard.execute(self.conn.exec(sql)).await?;
            Ok(QueryResult::empty())
        }
    }
}

#[async_trait]
impl Database for HanaDatabase {
    async fn execute(&self, sql: &str, kind: StatementKind) -> Result<QueryResult> {
        match kind {
            StatementKind::Read => self.run_query(sql).await,
            StatementKind::Write => self.run_write(sql).await,
        }
    }

    async fn describe_table(&self, schema: &str, table: &str) -> Result<TableSchema> {
        validate_identifier(schema, "schema name")?;
        validate_identifier(table, "table name")?;

        let rows = self
            .fetch_rows(&table_query(DESCRIBE_COLUMNS_TEMPLATE, schema, table))
            .await?;

        let columns: Vec<ColumnDescriptor> = rows
            .into_iter()
            .filter_map(|row| {
                let mut values = row.iter();
                let name = values.next().and_then(value_as_string)?;
                let data_type = values.next().and_then(value_as_string)?;
                let nullable = values.next().and_then(value_as_string)?;
                let default_value = values.next().and_then(value_as_string);
                Some(ColumnDescriptor {
                    name,
                    data_type,
                    nullable: nullable == SQL_TRUE,
                    default_value,
                })
            })
            .collect();

        if columns.is_empty() {
            return Err(Error::table_not_found(schema, table));
        }

        let primary_key: Vec<String> = self
            .fetch_rows(&table_query(PRIMARY_KEY_TEMPLATE, schema, table))
            .await?
            .iter()
            .filter_map(|row| row.first().and_then(value_as_string))
            .collect();

        tracing::debug!(
            schema = %schema,
            table = %table,
            columns = columns.len(),
            primary_key = primary_key.len(),
            "Table described"
        );

        Ok(TableSchema::new(schema, table, columns, primary_key))
    }

    async fn list_tables(&self) -> Result<Vec<TableRef>> {
        let tables: Vec<TableRef> = self
            .fetch_rows(LIST_TABLES_QUERY)
            .await?
            .iter()
            .filter_map(|row| {
                let schema_name = row.first().and_then(value_as_string)?;
                let table_name = row.get(1).and_then(value_as_string)?;
                Some(TableRef {
                    schema_name,
                    table_name,
                })
            })
            .collect();

        Ok(tables)
    }

    async fn current_schema(&self) -> Result<String> {
        self.fetch_rows(CURRENT_SCHEMA_QUERY)
            .await?
            .first()
            .and_then(|row| row.first())
            .and_then(value_as_string)
            .ok_or_else(|| Error::Query("CURRENT_SCHEMA returned no value".to_string()))
    }

    async fn ping(&self) -> Result<()> {
        self.guard
            .execute(self.conn.query(HEALTH_CHECK_QUERY))
            .await?;
        Ok(())
    }
}
