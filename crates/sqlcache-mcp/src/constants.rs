//! Constants for MCP server

/// SQL query to check database connection health
pub const HEALTH_CHECK_QUERY: &str = "SELECT 1 FROM DUMMY";

/// SQL query returning the session's current schema
pub const CURRENT_SCHEMA_QUERY: &str = "SELECT CURRENT_SCHEMA FROM DUMMY";

/// SQL query to list user tables, system schemas excluded
pub const LIST_TABLES_QUERY: &str = "SELECT SCHEMA_NAME, TABLE_NAME FROM SYS.TABLES \
     WHERE SCHEMA_NAME <> 'SYS' AND SCHEMA_NAME NOT LIKE '\\_SYS%' ESCAPE '\\' \
     ORDER BY SCHEMA_NAME, TABLE_NAME";

/// SQL query template to describe columns (use .replace("{SCHEMA}",
/// schema).replace("{TABLE}", table))
pub const DESCRIBE_COLUMNS_TEMPLATE: &str = "SELECT COLUMN_NAME, DATA_TYPE_NAME, IS_NULLABLE, DEFAULT_VALUE \
     FROM SYS.TABLE_COLUMNS WHERE SCHEMA_NAME = '{SCHEMA}' AND TABLE_NAME = '{TABLE}' \
     ORDER BY POSITION";

/// SQL query template to read primary key columns (use .replace("{SCHEMA}",
/// schema).replace("{TABLE}", table))
pub const PRIMARY_KEY_TEMPLATE: &str = "SELECT COLUMN_NAME FROM SYS.CONSTRAINTS \
     WHERE SCHEMA_NAME = '{SCHEMA}' AND TABLE_NAME = '{TABLE}' AND IS_PRIMARY_KEY = 'TRUE' \
     ORDER BY POSITION";

/// URI scheme of table resources: `table://<schema>/<table>`
pub const TABLE_URI_SCHEME: &str = "table://";

/// Resource listing every table
pub const ALL_TABLES_URI: &str = "table://*";

/// MIME type of resource contents
pub const JSON_MIME_TYPE: &str = "application/json";

/// Connection status: success
pub const STATUS_OK: &str = "ok";

/// SQL nullable value: TRUE
pub const SQL_TRUE: &str = "TRUE";

/// Render a catalog template for one table
#[must_use]
pub fn table_query(template: &str, schema: &str, table: &str) -> String {
    template
        .replace("{SCHEMA}", schema)
        .replace("{TABLE}", table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_query_substitutes_both_names() {
        let sql = table_query(DESCRIBE_COLUMNS_TEMPLATE, "APP", "USERS");
        assert!(sql.contains("SCHEMA_NAME = 'APP'"));
        assert!(sql.contains("TABLE_NAME = 'USERS'"));
        assert!(!sql.contains('{'));
    }

    #[test]
    fn test_primary_key_template() {
        let sql = table_query(PRIMARY_KEY_TEMPLATE, "APP", "ORDERS");
        assert!(sql.contains("IS_PRIMARY_KEY = 'TRUE'"));
        assert!(sql.contains("'ORDERS'"));
    }
}
