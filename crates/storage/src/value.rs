//! JSON to Firestore typed-value encoding.
//!
//! The REST API wants every value wrapped in a single-key object naming its
//! type, e.g. `{"integerValue": "42"}`. Integers travel as decimal strings.

use serde_json::{json, Map, Number, Value};

use crate::error::StorageError;

/// Encode a JSON object as a Firestore `fields` map.
pub fn encode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, StorageError> {
    fields
        .iter()
        .map(|(name, value)| Ok::<_, StorageError>((name.clone(), encode_value(name, value)?)))
        .collect()
}

/// Encode one JSON value. `path` names the field in error messages.
pub fn encode_value(path: &str, value: &Value) -> Result<Value, StorageError> {
    let encoded = match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => encode_number(path, n)?,
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values = items
                .iter()
                .enumerate()
                .map(|(i, item)| encode_value(&format!("{path}[{i}]"), item))
                .collect::<Result<Vec<_>, _>>()?;
            if values.is_empty() {
                json!({ "arrayValue": {} })
            } else {
                json!({ "arrayValue": { "values": values } })
            }
        }
        Value::Object(map) => {
            let fields = map
                .iter()
                .map(|(k, v)| {
                    Ok::<_, StorageError>((k.clone(), encode_value(&format!("{path}.{k}"), v)?))
                })
                .collect::<Result<Map<_, _>, _>>()?;
            json!({ "mapValue": { "fields": fields } })
        }
    };
    Ok(encoded)
}

fn encode_number(path: &str, n: &Number) -> Result<Value, StorageError> {
    if let Some(i) = n.as_i64() {
        Ok(json!({ "integerValue": i.to_string() }))
    } else if n.is_u64() {
        Err(StorageError::Encode {
            field: path.to_string(),
            reason: format!("integer {n} exceeds the 64-bit signed range"),
        })
    } else {
        let f = n.as_f64().ok_or_else(|| StorageError::Encode {
            field: path.to_string(),
            reason: format!("unrepresentable number {n}"),
        })?;
        Ok(json!({ "doubleValue": f }))
    }
}
