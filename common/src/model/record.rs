use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A persisted entity as returned by the backend.
///
/// Records are opaque to the client: apart from the numeric `id` assigned by
/// the backend on creation, every column is kept as a raw JSON value so that
/// the same type serves lab categories, organisations, programs and the rest
/// of the catalogue. Records are never edited in place; edits go through a
/// [`Draft`](crate::model::draft::Draft).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the stored string for `field`, or `None` when the value is
    /// missing, null, or not a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Renders `field` the way a form input expects it: absent and null
    /// values become an empty string, arrays are joined with `", "`.
    pub fn display(&self, field: &str) -> String {
        match self.fields.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            Some(other) => other.to_string(),
        }
    }

    /// Interprets `field` as a checkbox value. Accepts JSON booleans as well
    /// as the `0/1` and `"true"/"false"` encodings some endpoints return.
    pub fn flag(&self, field: &str) -> Option<bool> {
        match self.fields.get(field)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Decodes a single-record response. Endpoints answer either with the
    /// bare record or with a `{ "data": record }` envelope.
    pub fn from_response(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
                let data = map.remove("data").unwrap_or(Value::Null);
                serde_json::from_value(data)
            }
            other => serde_json::from_value(other),
        }
    }
}
