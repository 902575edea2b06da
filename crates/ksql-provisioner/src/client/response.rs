//! Lenient readers for ksqlDB response bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ProvisionResult;

/// Entry of a `SHOW TABLES` answer.
#[derive(Debug, Clone, Deserialize)]
pub struct TableInfo {
    pub name: String,
}

/// Table names listed in a `SHOW TABLES` answer.
///
/// The body is an array of entities; only entities carrying a `tables` array
/// contribute names.
pub fn table_names(body: &str) -> ProvisionResult<Vec<String>> {
    let entities: Vec<Value> = serde_json::from_str(body)?;

    let mut names = Vec::new();
    for entity in entities {
        if let Some(tables) = entity.get("tables") {
            let tables: Vec<TableInfo> = serde_json::from_value(tables.clone())?;
            names.extend(tables.into_iter().map(|t| t.name));
        }
    }
    Ok(names)
}

/// `commandStatus.message` of every entity in a statement answer.
///
/// Returns an empty list when the body is not the expected array.
pub fn command_messages(body: &str) -> Vec<String> {
    let Ok(entities) = serde_json::from_str::<Vec<Value>>(body) else {
        return Vec::new();
    };

    entities
        .iter()
        .filter_map(|entity| entity.pointer("/commandStatus/message"))
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

/// `message` field of a ksqlDB error body, if present.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Body re-indented when it is JSON, unchanged otherwise.
pub fn pretty_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}
