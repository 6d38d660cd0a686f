use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::record::Record;
use crate::schema::ResourceSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DraftValue {
    Text(String),
    Flag(bool),
}

/// Working copy of a record's editable fields while a form is open.
///
/// Every schema field is always present: text inputs hold strings (numbers and
/// lists included, exactly as typed) and checkboxes hold flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    values: BTreeMap<String, DraftValue>,
}

impl Draft {
    pub fn defaults(schema: &ResourceSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|field| {
                let value = if field.is_flag() {
                    DraftValue::Flag(field.default_flag)
                } else {
                    DraftValue::Text(String::new())
                };
                (field.name.to_string(), value)
            })
            .collect();
        Self { values }
    }

    /// Copies every editable field of `record`. Absent or null values become
    /// empty strings; flags missing from the record keep their default.
    pub fn from_record(schema: &ResourceSchema, record: &Record) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|field| {
                let value = if field.is_flag() {
                    DraftValue::Flag(record.flag(field.name).unwrap_or(field.default_flag))
                } else {
                    DraftValue::Text(record.display(field.name))
                };
                (field.name.to_string(), value)
            })
            .collect();
        Self { values }
    }

    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(DraftValue::Text(value)) => value,
            _ => "",
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(DraftValue::Flag(true)))
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(name.to_string(), DraftValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.values.insert(name.to_string(), DraftValue::Flag(value));
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
