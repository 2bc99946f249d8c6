//! Value conversion helpers

use hdbconnect_async::HdbValue;

/// Convert `HdbValue` to `serde_json::Value`
pub fn hdb_value_to_json(value: &HdbValue) -> serde_json::Value {
    match value {
        HdbValue::NULL => serde_json::Value::Null,
        HdbValue::TINYINT(v) => serde_json::json!(v),
        HdbValue::SMALLINT(v) => serde_json::json!(v),
        HdbValue::INT(v) => serde_json::json!(v),
        HdbValue::BIGINT(v) => serde_json::json!(v),
        HdbValue::DECIMAL(v) => serde_json::json!(v.to_string()),
        HdbValue::REAL(v) => serde_json::json!(v),
        HdbValue::DOUBLE(v) => serde_json::json!(v),
        HdbValue::STRING(v) => serde_json::json!(v),
        HdbValue::BOOLEAN(v) => serde_json::json!(v),
        _ => serde_json::json!(format!("{value:?}")),
    }
}

/// Text form of a catalog value; `None` for SQL NULL
pub fn value_as_string(value: &HdbValue) -> Option<String> {
    match value {
        HdbValue::NULL => None,
        HdbValue::STRING(s) => Some(s.clone()),
        other => match hdb_value_to_json(other) {
            serde_json::Value::String(s) => Some(s),
            json => Some(json.to_string()),
        },
    }
}
