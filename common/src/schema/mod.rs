//! Field schemas describing each administrative resource.
//!
//! A [`ResourceSchema`] is plain configuration data: the fields a form shows,
//! the rules each field must satisfy, the min/max pairs that must be ordered,
//! the grid columns, and the optional uploaded asset. Validation, payload
//! building, the resource controller and the form view all read from it, so
//! adding a resource means adding a schema in [`resources`] and nothing else.

pub mod resources;

use crate::api::Endpoint;

pub use resources::ResourceKind;

/// Input flavour of a field. Drives both validation and payload encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    /// Whole number entered as text; sent as a JSON integer (or null when empty).
    Integer,
    Boolean,
    /// Comma-separated text; sent as an array of trimmed, non-empty strings.
    CommaList,
    Email,
    Select(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    /// Value must not repeat (case-insensitively) among fetched records.
    pub unique: bool,
    /// Initial state for boolean fields on "add new".
    pub default_flag: bool,
    pub hint: Option<&'static str>,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            min_len: None,
            max_len: None,
            min_value: None,
            max_value: None,
            unique: false,
            default_flag: false,
            hint: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn long_text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::LongText)
    }

    pub fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub fn comma_list(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::CommaList).hint("Separate entries with commas")
    }

    pub fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, FieldKind::Select(options))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_len = Some(min);
        self.max_len = Some(max);
        self
    }

    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn at_least(mut self, min: i64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn checked(mut self) -> Self {
        self.default_flag = true;
        self
    }

    pub fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn is_flag(&self) -> bool {
        self.kind == FieldKind::Boolean
    }
}

/// Two numeric fields whose values must satisfy `min <= max`. The violation
/// is reported against `max_field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRule {
    pub min_field: &'static str,
    pub max_field: &'static str,
    pub message: &'static str,
}

/// Where bare asset file names live on the static server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetUrlConvention {
    LogoDirectory,
    Uploads,
}

impl AssetUrlConvention {
    pub fn prefix(self) -> &'static str {
        match self {
            AssetUrlConvention::LogoDirectory => "/uploads/logos/",
            AssetUrlConvention::Uploads => "/uploads/",
        }
    }
}

pub const MAX_ASSET_BYTES: u64 = 5 * 1024 * 1024;

pub const IMAGE_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

pub const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/png",
    "image/jpeg",
];

/// Uploaded binary attached to a resource (organisation logo, body document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    /// Record column holding the stored path, and multipart field for uploads.
    pub field: &'static str,
    /// Multipart flag sent when an existing asset is removed without replacement.
    pub delete_flag: &'static str,
    pub label: &'static str,
    pub accept: &'static [&'static str],
    pub max_bytes: u64,
    pub convention: AssetUrlConvention,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSchema {
    pub kind: ResourceKind,
    pub singular: &'static str,
    pub plural: &'static str,
    pub endpoint: Endpoint,
    pub fields: Vec<FieldSpec>,
    pub pairs: Vec<PairRule>,
    /// Fields shown as grid columns, in order.
    pub columns: Vec<&'static str>,
    pub asset: Option<AssetSpec>,
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn label_of<'a>(&'a self, name: &'a str) -> &'a str {
        self.field(name).map(|f| f.label).unwrap_or(name)
    }
}
