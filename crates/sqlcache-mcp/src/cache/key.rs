//! Cache key types

use std::fmt;

use sha2::{Digest, Sha256};

/// Key of the query result cache.
///
/// Derived from the statement text after collapsing every whitespace run to a
/// single space, so statements that differ only in layout share one entry.
/// The normalized text is hashed with SHA-256 and kept as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(String);

impl QueryKey {
    #[must_use]
    pub fn from_sql(sql: &str) -> Self {
        let digest = Sha256::digest(normalize_whitespace(sql).as_bytes());
        let hex = digest.iter().fold(String::with_capacity(64), |mut acc, b| {
            use fmt::Write;
            let _ = write!(acc, "{b:02x}");
            acc
        });
        Self(hex)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of the schema cache: `schema.table`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey(String);

impl TableKey {
    #[must_use]
    pub fn new(schema: &str, table: &str) -> Self {
        Self(format!("{schema}.{table}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapse whitespace runs to single spaces and trim both ends
#[must_use]
pub fn normalize_whitespace(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}
