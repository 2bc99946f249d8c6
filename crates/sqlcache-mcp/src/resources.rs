//! Table resources
//!
//! `table://*` lists every table; `table://<schema>/<table>` holds the column
//! definitions and primary key of one table, read through the schema cache.

use std::fmt;

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};

use crate::constants::{ALL_TABLES_URI, JSON_MIME_TYPE, TABLE_URI_SCHEME};
use crate::types::TableRef;
use crate::validation::validate_identifier;
use crate::{Error, Result};

/// URI template advertised for table resources
pub const TABLE_URI_TEMPLATE: &str = "table://{schema}/{table}";

/// Parsed table resource URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableUri {
    /// `table://*`
    All,
    /// `table://<schema>/<table>`
    Table { schema: String, table: String },
}

impl TableUri {
    /// Parse a resource URI; both names of a table URI must be valid identifiers.
    pub fn parse(uri: &str) -> Result<Self> {
        if uri == ALL_TABLES_URI {
            return Ok(Self::All);
        }

        let Some((schema, table)) = uri
            .strip_prefix(TABLE_URI_SCHEME)
            .and_then(|path| path.split_once('/'))
        else {
            return Err(Error::UnknownResource(uri.to_string()));
        };

        validate_identifier(schema, "schema name")?;
        validate_identifier(table, "table name")?;

        Ok(Self::Table {
            schema: schema.to_string(),
            table: table.to_string(),
        })
    }

    pub fn table(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self::Table {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_TABLES_URI),
            Self::Table { schema, table } => write!(f, "{TABLE_URI_SCHEME}{schema}/{table}"),
        }
    }
}

/// Resource entry for one listed table
#[must_use]
pub fn table_resource(table: &TableRef) -> Resource {
    let qualified = format!("{}.{}", table.schema_name, table.table_name);
    let uri = TableUri::table(table.schema_name.as_str(), table.table_name.as_str());

    RawResource::new(uri.to_string(), qualified.as_str())
        .with_description(format!("Columns and primary key of {qualified}"))
        .with_mime_type(JSON_MIME_TYPE)
        .no_annotation()
}

/// Resource entry listing every table
#[must_use]
pub fn all_tables_resource() -> Resource {
    RawResource::new(ALL_TABLES_URI, "All tables")
        .with_description("Every table outside the system schemas")
        .with_mime_type(JSON_MIME_TYPE)
        .no_annotation()
}

#[must_use]
pub fn table_resource_template() -> ResourceTemplate {
    RawResourceTemplate::new(TABLE_URI_TEMPLATE, "Table schema")
        .with_description("Columns and primary key of any table by schema and name")
        .with_mime_type(JSON_MIME_TYPE)
        .no_annotation()
}
