//! Tour records as they come out of the seed file.
//!
//! A seed file is a JSON array of objects. Every object must carry an `id`
//! that coerces to an `i64`; that integer becomes the document key and is
//! written back into the record so the stored `id` matches the key. All other
//! fields pass through untouched.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::TourError;

/// Raw tour record: field name to JSON value.
pub type TourFields = Map<String, Value>;

/// Default seed file location, relative to the working directory.
pub const DEFAULT_SEED_FILE: &str = "data/seed_tours.json";

/// A tour whose `id` has been validated and normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub id: i64,
    pub fields: TourFields,
}

impl Tour {
    /// Validate the record at `index` and coerce its `id` to an integer.
    ///
    /// The coerced id replaces the original value inside `fields`.
    pub fn normalize(index: usize, mut fields: TourFields) -> Result<Self, TourError> {
        let raw = fields.get("id").ok_or(TourError::MissingId { index })?;
        let id = coerce_id(raw).map_err(|reason| TourError::InvalidId {
            index,
            value: raw.to_string(),
            reason,
        })?;
        fields.insert("id".to_string(), Value::from(id));
        Ok(Self { id, fields })
    }

    /// Document key: the decimal form of the id.
    pub fn doc_id(&self) -> String {
        self.id.to_string()
    }
}

/// Read the seed file and check its shape.
///
/// The top level must be an array and every element an object. Ids are not
/// checked here; see [`Tour::normalize`].
pub fn load_seed_data(path: impl AsRef<Path>) -> Result<Vec<TourFields>, TourError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| TourError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data: Value = serde_json::from_str(&content).map_err(|source| TourError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = data else {
        return Err(TourError::Format(
            "seed data must be an array of tours".into(),
        ));
    };

    let tours = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(fields),
            other => Err(TourError::Format(format!(
                "tour at index {index} must be an object, got {}",
                json_kind(&other)
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(path = %path.display(), count = tours.len(), "Loaded seed data");
    Ok(tours)
}

/// Coerce a JSON value to an `i64` document id.
///
/// Accepts integers, finite floats (truncated toward zero), booleans and
/// integer strings (surrounding whitespace, a sign and `_` digit separators
/// allowed).
pub fn coerce_id(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                Err("integer does not fit in 64 bits".into())
            } else {
                let f = n.as_f64().ok_or_else(|| "unrepresentable number".to_string())?;
                float_to_id(f)
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => parse_int_str(s),
        other => Err(format!("{} cannot be used as an id", json_kind(other))),
    }
}

fn float_to_id(f: f64) -> Result<i64, String> {
    if !f.is_finite() {
        return Err("non-finite number".into());
    }
    let t = f.trunc();
    // i64::MAX is not exactly representable; 2^63 is the first value out of range.
    if t < -9_223_372_036_854_775_808.0 || t >= 9_223_372_036_854_775_808.0 {
        return Err("number out of 64-bit range".into());
    }
    Ok(t as i64)
}

fn parse_int_str(s: &str) -> Result<i64, String> {
    let trimmed = s.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '_')
    {
        return Err(format!("'{s}' is not an integer"));
    }

    let mut normalized: String = digits.chars().filter(|c| *c != '_').collect();
    if negative {
        normalized.insert(0, '-');
    }
    normalized
        .parse::<i64>()
        .map_err(|_| format!("'{s}' does not fit in 64 bits"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> TourFields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_coerce_integer_and_string() {
        assert_eq!(coerce_id(&json!(7)), Ok(7));
        assert_eq!(coerce_id(&json!(-3)), Ok(-3));
        assert_eq!(coerce_id(&json!("42")), Ok(42));
        assert_eq!(coerce_id(&json!("  +42 ")), Ok(42));
        assert_eq!(coerce_id(&json!("-1_000")), Ok(-1000));
    }

    #[test]
    fn test_coerce_float_and_bool() {
        assert_eq!(coerce_id(&json!(3.9)), Ok(3));
        assert_eq!(coerce_id(&json!(-3.9)), Ok(-3));
        assert_eq!(coerce_id(&json!(true)), Ok(1));
        assert_eq!(coerce_id(&json!(false)), Ok(0));
    }

    #[test]
    fn test_coerce_rejects_non_integers() {
        assert!(coerce_id(&json!("42.0")).is_err());
        assert!(coerce_id(&json!("abc")).is_err());
        assert!(coerce_id(&json!("")).is_err());
        assert!(coerce_id(&json!("1__0")).is_err());
        assert!(coerce_id(&json!("_1")).is_err());
        assert!(coerce_id(&json!(null)).is_err());
        assert!(coerce_id(&json!([1])).is_err());
        assert!(coerce_id(&json!({"n": 1})).is_err());
        assert!(coerce_id(&json!(u64::MAX)).is_err());
        assert!(coerce_id(&json!("99999999999999999999")).is_err());
    }

    #[test]
    fn test_normalize_writes_id_back() {
        let tour = Tour::normalize(0, fields(json!({"id": "42", "title": "Lagoon"}))).unwrap();
        assert_eq!(tour.id, 42);
        assert_eq!(tour.doc_id(), "42");
        assert_eq!(tour.fields["id"], json!(42));
        assert_eq!(tour.fields["title"], json!("Lagoon"));
    }

    #[test]
    fn test_normalize_missing_id() {
        let err = Tour::normalize(5, fields(json!({"title": "No id"}))).unwrap_err();
        assert!(matches!(err, TourError::MissingId { index: 5 }));
    }

    #[test]
    fn test_normalize_invalid_id() {
        let err = Tour::normalize(1, fields(json!({"id": "x1"}))).unwrap_err();
        match err {
            TourError::InvalidId { index, value, .. } => {
                assert_eq!(index, 1);
                assert_eq!(value, "\"x1\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_seed_data_array() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("seed.json");
        std::fs::write(&path, r#"[{"id": 1, "name": "a"}, {"id": "2"}]"#).unwrap();

        let tours = load_seed_data(&path).unwrap();
        assert_eq!(tours.len(), 2);
        assert_eq!(tours[0]["name"], json!("a"));
    }

    #[test]
    fn test_load_seed_data_empty_array() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("seed.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(load_seed_data(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_seed_data_rejects_object() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("seed.json");
        std::fs::write(&path, r#"{"id": 1}"#).unwrap();

        let err = load_seed_data(&path).unwrap_err();
        assert!(matches!(err, TourError::Format(ref msg) if msg.contains("must be an array")));
    }

    #[test]
    fn test_load_seed_data_rejects_non_object_element() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("seed.json");
        std::fs::write(&path, r#"[{"id": 1}, 2]"#).unwrap();

        let err = load_seed_data(&path).unwrap_err();
        assert!(matches!(err, TourError::Format(ref msg) if msg.contains("index 1")));
    }

    #[test]
    fn test_load_seed_data_missing_file() {
        let err = load_seed_data("/nonexistent/seed.json").unwrap_err();
        assert!(matches!(err, TourError::Io { .. }));
    }

    #[test]
    fn test_load_seed_data_invalid_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("seed.json");
        std::fs::write(&path, "[{").unwrap();
        assert!(matches!(load_seed_data(&path), Err(TourError::Json { .. })));
    }
}
