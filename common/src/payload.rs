//! Outgoing request bodies built from a validated draft.

use serde_json::{Map, Value};

use crate::model::asset::AssetChange;
use crate::model::draft::Draft;
use crate::schema::{FieldKind, ResourceSchema};
use crate::validation::split_list;

/// Multipart body for asset-bearing resources. Non-string values are
/// encoded as text (arrays as JSON); nulls are left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm<F> {
    pub fields: Vec<(String, String)>,
    pub file: Option<(String, F)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload<F> {
    Json(Map<String, Value>),
    Multipart(MultipartForm<F>),
}

impl<F> Payload<F> {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart(_))
    }
}

/// Converts the draft into typed JSON values: integers parsed (empty → null),
/// comma lists split, flags passed through, text as typed.
pub fn draft_values(schema: &ResourceSchema, draft: &Draft) -> Map<String, Value> {
    let mut values = Map::new();
    for field in &schema.fields {
        let value = match field.kind {
            FieldKind::Boolean => Value::Bool(draft.flag(field.name)),
            FieldKind::Integer => draft
                .text(field.name)
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::Null),
            FieldKind::CommaList => Value::Array(
                split_list(draft.text(field.name))
                    .into_iter()
                    .map(Value::String)
                    .collect(),
            ),
            FieldKind::Text | FieldKind::LongText | FieldKind::Email | FieldKind::Select(_) => {
                Value::String(draft.text(field.name).to_string())
            }
        };
        values.insert(field.name.to_string(), value);
    }
    values
}

/// Builds the request body. Resources with an asset always go as multipart;
/// the asset change decides whether a file, a delete flag, or nothing is added.
pub fn build_payload<F>(
    schema: &ResourceSchema,
    draft: &Draft,
    asset: AssetChange<F>,
    editing: bool,
) -> Payload<F> {
    let values = draft_values(schema, draft);

    let Some(spec) = &schema.asset else {
        return Payload::Json(values);
    };

    let mut fields: Vec<(String, String)> = values
        .into_iter()
        .filter_map(|(name, value)| form_text(&value).map(|text| (name, text)))
        .collect();

    let file = match asset {
        AssetChange::Replace(file) => Some((spec.field.to_string(), file)),
        AssetChange::Delete if editing => {
            fields.push((spec.delete_flag.to_string(), "true".to_string()));
            None
        }
        AssetChange::Delete | AssetChange::Keep => None,
    };

    Payload::Multipart(MultipartForm { fields, file })
}

fn form_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
