//! Client-side validation of drafts against their resource schema.
//!
//! Validation is a pure function of the draft (plus the fetched records, for
//! uniqueness). Every violation is collected; the first one in field
//! declaration order becomes the headline message.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::draft::Draft;
use crate::model::record::Record;
use crate::schema::{FieldKind, FieldSpec, PairRule, ResourceSchema};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Field name → message, in insertion order, at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    entries: Vec<(String, String)>,
}

impl ValidationErrors {
    /// Records `message` for `field` unless the field already has one.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        if !self.contains(field) {
            self.entries.push((field.to_string(), message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn clear_field(&mut self, field: &str) {
        self.entries.retain(|(name, _)| name != field);
    }

    /// Headline message: the first recorded violation.
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, message)| (name.as_str(), message.as_str()))
    }
}

/// Data outside the draft that some rules need.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext<'a> {
    /// Records already fetched for the current page.
    pub records: &'a [Record],
    /// Record being edited; excluded from uniqueness checks.
    pub editing_id: Option<i64>,
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Splits a comma-separated input into trimmed, non-empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn validate_draft(
    schema: &ResourceSchema,
    draft: &Draft,
    context: ValidationContext<'_>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    for field in &schema.fields {
        if field.is_flag() {
            continue;
        }
        if let Some(message) = check_field(field, draft.text(field.name), context) {
            errors.insert(field.name, message);
            continue;
        }
        // Pairs report on their max field, in that field's declaration slot.
        for pair in schema.pairs.iter().filter(|p| p.max_field == field.name) {
            if pair_violated(pair, draft, &errors) {
                errors.insert(pair.max_field, pair.message);
            }
        }
    }

    errors
}

fn pair_violated(pair: &PairRule, draft: &Draft, errors: &ValidationErrors) -> bool {
    if errors.contains(pair.min_field) {
        return false;
    }
    let min = draft.text(pair.min_field).trim().parse::<i64>();
    let max = draft.text(pair.max_field).trim().parse::<i64>();
    matches!((min, max), (Ok(min), Ok(max)) if min > max)
}

fn check_field(field: &FieldSpec, raw: &str, context: ValidationContext<'_>) -> Option<String> {
    let value = raw.trim();
    let label = field.label;

    if value.is_empty() {
        return field.required.then(|| format!("{label} is required"));
    }

    match field.kind {
        FieldKind::Integer => {
            let Ok(number) = value.parse::<i64>() else {
                return Some(format!("{label} must be a whole number"));
            };
            if let Some(min) = field.min_value {
                if number < min {
                    return Some(format!("{label} must be at least {min}"));
                }
            }
            if let Some(max) = field.max_value {
                if number > max {
                    return Some(format!("{label} must not exceed {max}"));
                }
            }
        }
        FieldKind::CommaList => {
            if split_list(value).is_empty() {
                return Some(format!("{label} must contain at least one entry"));
            }
        }
        FieldKind::Email => {
            if !is_valid_email(value) {
                return Some(format!("{label} must be a valid email address"));
            }
        }
        FieldKind::Select(options) => {
            if !options.contains(&value) {
                return Some(format!("{label} must be one of: {}", options.join(", ")));
            }
        }
        FieldKind::Text | FieldKind::LongText | FieldKind::Boolean => {}
    }

    let length = value.chars().count();
    if let Some(min) = field.min_len {
        if length < min {
            return Some(format!("{label} must be at least {min} characters long"));
        }
    }
    if let Some(max) = field.max_len {
        if length > max {
            return Some(format!("{label} must not exceed {max} characters"));
        }
    }

    if field.unique && is_taken(field.name, value, context) {
        return Some(format!("{label} is already in use"));
    }

    None
}

fn is_taken(name: &str, value: &str, context: ValidationContext<'_>) -> bool {
    let wanted = value.to_lowercase();
    context
        .records
        .iter()
        .filter(|record| context.editing_id.is_none() || record.id != context.editing_id)
        .any(|record| record.display(name).trim().to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ResourceKind;
    use serde_json::json;

    fn program_draft() -> Draft {
        let schema = ResourceKind::Programs.schema();
        let mut draft = Draft::defaults(&schema);
        for (name, value) in [
            ("program_title", "Bachelor of Technology"),
            ("acronym", "BTECH"),
            ("organisation_id", "1"),
            ("program_min_duration", "4"),
            ("program_max_duration", "6"),
            ("term_min_duration", "5"),
            ("term_max_duration", "6"),
            ("term_min_credits", "0"),
            ("term_max_credits", "30"),
            ("specializations", "AI, Robotics"),
            ("course_types", "Core,Elective"),
        ] {
            draft.set_text(name, value);
        }
        draft
    }

    fn validate(kind: ResourceKind, draft: &Draft) -> ValidationErrors {
        validate_draft(&kind.schema(), draft, ValidationContext::default())
    }

    #[test]
    fn complete_program_passes() {
        assert!(validate(ResourceKind::Programs, &program_draft()).is_empty());
    }

    #[test]
    fn every_missing_required_field_is_reported() {
        let schema = ResourceKind::Programs.schema();
        let errors = validate(ResourceKind::Programs, &Draft::defaults(&schema));
        for field in schema.fields.iter().filter(|f| f.required) {
            assert!(errors.contains(field.name), "missing {}", field.name);
        }
        assert_eq!(errors.first(), Some("Program title is required"));
    }

    #[test]
    fn short_category_name_message() {
        let schema = ResourceKind::LabCategories.schema();
        let mut draft = Draft::defaults(&schema);
        draft.set_text("category_name", "A");
        let errors = validate(ResourceKind::LabCategories, &draft);
        assert_eq!(
            errors.first(),
            Some("Category name must be at least 2 characters long")
        );
    }

    #[test]
    fn min_max_pairs_are_ordered() {
        for (min_field, max_field) in [
            ("program_min_duration", "program_max_duration"),
            ("term_min_duration", "term_max_duration"),
            ("term_min_credits", "term_max_credits"),
        ] {
            let mut draft = program_draft();
            draft.set_text(min_field, "5");
            draft.set_text(max_field, "4");
            let errors = validate(ResourceKind::Programs, &draft);
            assert_eq!(errors.len(), 1);
            assert!(errors.contains(max_field));
            assert!(errors.get(max_field).unwrap().contains("greater than or equal"));

            draft.set_text(max_field, "5");
            assert!(validate(ResourceKind::Programs, &draft).is_empty());
        }
    }

    #[test]
    fn pair_violation_heads_later_declared_field_errors() {
        let mut draft = program_draft();
        draft.set_text("program_min_duration", "5");
        draft.set_text("program_max_duration", "4");
        draft.set_text("description", "x".repeat(501));

        let errors = validate(ResourceKind::Programs, &draft);
        let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["program_max_duration", "description"]);
        assert_eq!(
            errors.first(),
            Some("Maximum duration must be greater than or equal to minimum duration")
        );
    }

    #[test]
    fn credits_accept_zero_but_durations_do_not() {
        let mut draft = program_draft();
        draft.set_text("term_min_credits", "0");
        draft.set_text("program_min_duration", "0");
        let errors = validate(ResourceKind::Programs, &draft);
        assert!(!errors.contains("term_min_credits"));
        assert_eq!(
            errors.get("program_min_duration"),
            Some("Minimum duration must be at least 1")
        );
    }

    #[test]
    fn comma_list_of_only_separators_is_rejected() {
        let mut draft = program_draft();
        draft.set_text("specializations", " , ,");
        let errors = validate(ResourceKind::Programs, &draft);
        assert_eq!(
            errors.get("specializations"),
            Some("Specializations must contain at least one entry")
        );
    }

    #[test]
    fn length_and_shape_rules() {
        let schema = ResourceKind::Organisations.schema();
        let mut draft = Draft::defaults(&schema);
        draft.set_text("organisation_name", "Institute");
        draft.set_text("acronym", "TOOLONGACRONYM");
        draft.set_text("email", "admin@institute");
        draft.set_text("mission", "short");
        draft.set_text("vision", "A vision that is long enough");
        let errors = validate(ResourceKind::Organisations, &draft);

        assert_eq!(errors.get("acronym"), Some("Acronym must not exceed 10 characters"));
        assert_eq!(errors.get("email"), Some("Email must be a valid email address"));
        assert_eq!(
            errors.get("mission"),
            Some("Mission must be at least 10 characters long")
        );
        assert!(!errors.contains("vision"));
        assert_eq!(errors.first(), Some("Acronym must not exceed 10 characters"));
    }

    #[test]
    fn description_is_capped_at_500() {
        let schema = ResourceKind::LabCategories.schema();
        let mut draft = Draft::defaults(&schema);
        draft.set_text("category_name", "Physics");
        draft.set_text("description", "x".repeat(501));
        let errors = validate(ResourceKind::LabCategories, &draft);
        assert_eq!(
            errors.get("description"),
            Some("Description must not exceed 500 characters")
        );
        draft.set_text("description", "x".repeat(500));
        assert!(validate(ResourceKind::LabCategories, &draft).is_empty());
    }

    #[test]
    fn user_email_must_be_unique_except_for_the_edited_record() {
        let schema = ResourceKind::Users.schema();
        let records: Vec<Record> = vec![
            serde_json::from_value(json!({"id": 1, "email": "Ana@Uni.edu"})).unwrap(),
            serde_json::from_value(json!({"id": 2, "email": "bo@uni.edu"})).unwrap(),
        ];
        let mut draft = Draft::defaults(&schema);
        draft.set_text("full_name", "Ana Perez");
        draft.set_text("role", "faculty");
        draft.set_text("email", "ana@uni.edu");

        let creating = validate_draft(
            &schema,
            &draft,
            ValidationContext {
                records: &records,
                editing_id: None,
            },
        );
        assert_eq!(creating.get("email"), Some("Email is already in use"));

        let editing_self = validate_draft(
            &schema,
            &draft,
            ValidationContext {
                records: &records,
                editing_id: Some(1),
            },
        );
        assert!(editing_self.is_empty());
    }

    #[test]
    fn optional_pair_is_skipped_when_one_side_is_empty() {
        let schema = ResourceKind::Patents.schema();
        let mut draft = Draft::defaults(&schema);
        draft.set_text("patent_title", "Solar dryer");
        draft.set_text("application_number", "IN2024001");
        draft.set_text("inventors", "R. Rao");
        draft.set_text("status", "Filed");
        draft.set_text("filing_year", "2024");
        assert!(validate(ResourceKind::Patents, &draft).is_empty());

        draft.set_text("grant_year", "2020");
        let errors = validate(ResourceKind::Patents, &draft);
        assert_eq!(
            errors.first(),
            Some("Grant year must not be earlier than filing year")
        );
    }

    #[test]
    fn clearing_a_field_keeps_the_others() {
        let mut errors = ValidationErrors::default();
        errors.insert("a", "first");
        errors.insert("b", "second");
        errors.insert("a", "ignored");
        errors.clear_field("a");
        assert_eq!(errors.first(), Some("second"));
        assert_eq!(errors.len(), 1);
    }
}
