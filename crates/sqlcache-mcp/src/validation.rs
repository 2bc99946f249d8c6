//! Identifier validation for catalog lookups

use crate::Error;

/// Maximum length for SQL identifiers (HANA limit is 127)
const MAX_IDENTIFIER_LENGTH: usize = 127;

/// Validate SQL identifier (schema/table name) to prevent injection
pub fn is_valid_identifier(name: &str) -> bool {
    let Some(first_char) = name.chars().next() else {
        return false;
    };

    if name.len() > MAX_IDENTIFIER_LENGTH || first_char.is_ascii_digit() {
        return false;
    }

    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '#')
}

/// Validate identifier and return error if invalid
pub fn validate_identifier(name: &str, context: &str) -> Result<(), Error> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(format!(
            "Invalid {context}: '{name}'. \
             Must be 1-127 alphanumeric characters (a-z, A-Z, 0-9, _, $, #), \
             cannot start with a digit."
        )))
    }
}

/// Split `schema.table` into its parts.
///
/// A bare name takes the schema from `schema_param`, if any. A qualified name
/// together with a different `schema_param` is rejected.
pub fn parse_qualified_name(
    name: &str,
    schema_param: Option<&str>,
) -> Result<(Option<String>, String), Error> {
    match name.split_once('.') {
        Some((schema, table)) if !table.contains('.') => match schema_param {
            Some(param) if param != schema => Err(Error::InvalidIdentifier(format!(
                "Conflicting schema: '{name}' is qualified with '{schema}' but schema '{param}' was given"
            ))),
            _ => Ok((Some(schema.to_string()), table.to_string())),
        },
        Some(_) => Ok((None, name.to_string())),
        None => Ok((schema_param.map(ToString::to_string), name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifier_simple() {
        assert!(is_valid_identifier("USERS"));
        assert!(is_valid_identifier("my_table"));
        assert!(is_valid_identifier("Schema1"));
    }

    #[test]
    fn test_valid_identifier_special_chars() {
        assert!(is_valid_identifier("$system"));
        assert!(is_valid_identifier("#temp"));
        assert!(is_valid_identifier("table_$1"));
    }

    #[test]
    fn test_invalid_identifier_empty() {
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_invalid_identifier_starts_with_digit() {
        assert!(!is_valid_identifier("1table"));
        assert!(!is_valid_identifier("123"));
    }

    #[test]
    fn test_invalid_identifier_special_chars() {
        assert!(!is_valid_identifier("table-name"));
        assert!(!is_valid_identifier("table.name"));
        assert!(!is_valid_identifier("table name"));
        assert!(!is_valid_identifier("table;drop"));
        assert!(!is_valid_identifier("table'--"));
    }

    #[test]
    fn test_identifier_length_limit() {
        assert!(is_valid_identifier(&"a".repeat(127)));
        assert!(!is_valid_identifier(&"a".repeat(128)));
    }

    #[test]
    fn test_validate_identifier_ok() {
        assert!(validate_identifier("users", "table name").is_ok());
    }

    #[test]
    fn test_validate_identifier_error_names_context() {
        let err = validate_identifier("user;--", "table name").unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier(_)));
        assert!(err.to_string().contains("table name"));
    }

    #[test]
    fn test_parse_qualified_name_qualified() {
        let (schema, table) = parse_qualified_name("APP.USERS", None).unwrap();
        assert_eq!(schema.as_deref(), Some("APP"));
        assert_eq!(table, "USERS");
    }

    #[test]
    fn test_parse_qualified_name_rejects_conflicting_schema() {
        let err = parse_qualified_name("HR.USERS", Some("APP")).unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier(_)));
        assert!(err.to_string().contains("'HR'"));
        assert!(err.to_string().contains("'APP'"));
    }

    #[test]
    fn test_parse_qualified_name_accepts_matching_schema() {
        let (schema, table) = parse_qualified_name("APP.USERS", Some("APP")).unwrap();
        assert_eq!(schema.as_deref(), Some("APP"));
        assert_eq!(table, "USERS");
    }

    #[test]
    fn test_parse_qualified_name_simple_no_schema() {
        let (schema, table) = parse_qualified_name("USERS", None).unwrap();
        assert!(schema.is_none());
        assert_eq!(table, "USERS");
    }

    #[test]
    fn test_parse_qualified_name_simple_with_schema_param() {
        let (schema, table) = parse_qualified_name("USERS", Some("DEFAULT")).unwrap();
        assert_eq!(schema.as_deref(), Some("DEFAULT"));
        assert_eq!(table, "USERS");
    }

    #[test]
    fn test_parse_qualified_name_too_many_dots() {
        let (schema, table) = parse_qualified_name("A.B.C", Some("DEFAULT")).unwrap();
        assert!(schema.is_none());
        assert_eq!(table, "A.B.C");
    }
}
