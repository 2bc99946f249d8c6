//! Read/write classification of SQL statements
//!
//! Classification looks only at the first keyword after comments are removed.
//! It is a heuristic, not a parser: a write hidden behind another leading
//! keyword (for example a procedure `CALL` that modifies data) is classified as
//! a read.

use std::fmt;

/// Leading keywords of statements that change data, schema or transaction state
const WRITE_KEYWORDS: &[&str] = &[
    "INSERT",
    "UPDATE",
    "DELETE",
    "DROP",
    "CREATE",
    "ALTER",
    "TRUNCATE",
    "GRANT",
    "REVOKE",
    "COMMIT",
    "ROLLBACK",
    "SAVEPOINT",
];

/// Result of classifying a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// No mutation detected; eligible for result caching
    Read,
    /// Mutating statement; invalidates every cache on success
    Write,
}

impl StatementKind {
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a statement as read-only or mutating.
///
/// An empty statement (or one made only of comments) is a read: there is
/// nothing to invalidate the cache over.
#[must_use]
pub fn classify(sql: &str) -> StatementKind {
    match leading_keyword(sql) {
        Some(keyword) if WRITE_KEYWORDS.contains(&keyword.as_str()) => StatementKind::Write,
        _ => StatementKind::Read,
    }
}

/// First whitespace-delimited token after comment removal, uppercased
#[must_use]
pub fn leading_keyword(sql: &str) -> Option<String> {
    strip_sql_comments(sql)
        .split_whitespace()
        .next()
        .map(str::to_uppercase)
}

/// Strip SQL comments (both -- and /* */ style).
///
/// A `--` comment runs to the end of the line or of the input. A block
/// comment ends at the first `*/`; an unterminated one runs to the end of the
/// input. Comment markers inside quoted literals are kept.
#[must_use]
pub fn strip_sql_comments(sql: &str) -> String {
    let mut result = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    while let Some(c) = chars.next() {
        if c == '\'' && !in_double_quote {
            in_single_quote = !in_single_quote;
            result.push(c);
            continue;
        }
        if c == '"' && !in_single_quote {
            in_double_quote = !in_double_quote;
            result.push(c);
            continue;
        }

        if in_single_quote || in_double_quote {
            result.push(c);
            continue;
        }

        if c == '-' && chars.peek() == Some(&'-') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '\n' {
                    result.push(' ');
                    break;
                }
            }
            continue;
        }

        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            while let Some(ch) = chars.next() {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    result.push(' ');
                    break;
                }
            }
            continue;
        }

        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_is_read() {
        assert_eq!(classify("SELECT * FROM users"), StatementKind::Read);
        assert_eq!(classify("select 1 from dummy"), StatementKind::Read);
    }

    #[test]
    fn test_other_read_keywords() {
        assert_eq!(
            classify("WITH t AS (SELECT 1) SELECT * FROM t"),
            StatementKind::Read
        );
        assert_eq!(classify("SHOW search_path"), StatementKind::Read);
        assert_eq!(classify("EXPLAIN PLAN FOR SELECT 1"), StatementKind::Read);
        assert_eq!(classify("FOOBAR baz"), StatementKind::Read);
    }

    #[test]
    fn test_every_write_keyword() {
        for keyword in WRITE_KEYWORDS {
            let sql = format!("{keyword} something");
            assert_eq!(classify(&sql), StatementKind::Write, "{sql}");
            assert_eq!(classify(&sql.to_lowercase()), StatementKind::Write, "{sql}");
        }
    }

    #[test]
    fn test_leading_whitespace_write() {
        assert_eq!(classify("  DROP TABLE x"), StatementKind::Write);
        assert_eq!(
            classify("\n\tinsert into t values (1)"),
            StatementKind::Write
        );
    }

    #[test]
    fn test_empty_is_read() {
        assert_eq!(classify(""), StatementKind::Read);
        assert_eq!(classify("   \n\t "), StatementKind::Read);
        assert_eq!(classify("-- only a comment"), StatementKind::Read);
        assert_eq!(classify("/* only a comment */"), StatementKind::Read);
    }

    #[test]
    fn test_line_comment_before_select() {
        assert_eq!(classify("-- comment\n  SELECT 1"), StatementKind::Read);
    }

    #[test]
    fn test_line_comment_before_write() {
        assert_eq!(
            classify("-- harmless\nDELETE FROM users"),
            StatementKind::Write
        );
    }

    #[test]
    fn test_block_comment_before_write() {
        assert_eq!(
            classify("/* multi\nline */ UPDATE users SET a = 1"),
            StatementKind::Write
        );
        assert_eq!(
            classify("/* a */ /* b */ TRUNCATE TABLE logs"),
            StatementKind::Write
        );
    }

    #[test]
    fn test_block_comment_is_non_greedy() {
        assert_eq!(
            classify("/* one */ SELECT 1 /* two */"),
            StatementKind::Read
        );
        assert_eq!(
            classify("/* one */ DROP TABLE t /* two */"),
            StatementKind::Write
        );
    }

    #[test]
    fn test_keyword_glued_to_comment() {
        assert_eq!(classify("/*x*/DROP TABLE t"), StatementKind::Write);
    }

    #[test]
    fn test_keyword_must_be_whole_token() {
        assert_eq!(classify("INSERTED_ROWS"), StatementKind::Read);
        assert_eq!(classify("UPDATES"), StatementKind::Read);
    }

    #[test]
    fn test_write_inside_cte_not_detected() {
        // Heuristic limitation: only the leading keyword counts
        assert_eq!(
            classify("WITH x AS (SELECT 1) DELETE FROM t"),
            StatementKind::Read
        );
        assert_eq!(classify("CALL purge_everything()"), StatementKind::Read);
    }

    #[test]
    fn test_leading_keyword() {
        assert_eq!(
            leading_keyword("  -- c\n select 1").as_deref(),
            Some("SELECT")
        );
        assert_eq!(leading_keyword("/* only */"), None);
        assert_eq!(leading_keyword(""), None);
    }

    #[test]
    fn test_strip_comments_preserves_string_literals() {
        let sql = "SELECT '-- not a comment', \"/* nor this */\" FROM t";
        assert_eq!(strip_sql_comments(sql), sql);
    }

    #[test]
    fn test_strip_sql_comments_line_comment() {
        let result = strip_sql_comments("SELECT 1 -- trailing\nFROM t");
        assert!(result.contains("SELECT 1"));
        assert!(result.contains("FROM t"));
        assert!(!result.contains("trailing"));
    }

    #[test]
    fn test_strip_sql_comments_line_comment_at_end_of_input() {
        assert_eq!(
            strip_sql_comments("SELECT 1 -- trailing").trim(),
            "SELECT 1"
        );
    }

    #[test]
    fn test_strip_sql_comments_unterminated_block() {
        assert_eq!(
            strip_sql_comments("SELECT 1 /* never closed").trim(),
            "SELECT 1"
        );
    }

    #[test]
    fn test_statement_kind_display() {
        assert_eq!(StatementKind::Read.to_string(), "read");
        assert_eq!(StatementKind::Write.to_string(), "write");
        assert!(StatementKind::Write.is_write());
        assert!(!StatementKind::Read.is_write());
    }
}
