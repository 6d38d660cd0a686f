use std::collections::VecDeque;

use common::api::ListQuery;
use common::config::AppConfig;
use common::controller::{Effect, ResourceController};
use common::model::asset::FileMeta;
use common::model::notification::{Notification, NotificationKind};
use common::model::pagination::{ListResponse, PaginationInfo};
use common::model::record::Record;
use common::payload::Payload;
use common::schema::ResourceKind;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
struct TestFile(&'static str);

type Controller = ResourceController<TestFile>;

/// In-memory stand-in for the REST backend.
#[derive(Default)]
struct FakeBackend {
    records: Vec<Record>,
    next_id: i64,
    requests: Vec<String>,
    payloads: Vec<Payload<TestFile>>,
    asset_field: &'static str,
    delete_flag: &'static str,
}

impl FakeBackend {
    fn for_kind(kind: ResourceKind) -> Self {
        let schema = kind.schema();
        let (asset_field, delete_flag) = schema
            .asset
            .map(|a| (a.field, a.delete_flag))
            .unwrap_or(("", ""));
        Self {
            next_id: 1,
            asset_field,
            delete_flag,
            ..Self::default()
        }
    }

    fn seed(&mut self, fields: Value) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        let mut record: Record = serde_json::from_value(fields).unwrap();
        record.id = Some(id);
        self.records.push(record);
        id
    }

    /// Runs `effects` (and everything they trigger) to completion and
    /// returns the notifications raised along the way.
    fn run(&mut self, controller: &mut Controller, effects: Vec<Effect<TestFile>>) -> Vec<Notification> {
        let mut queue: VecDeque<_> = effects.into();
        let mut notifications = Vec::new();
        while let Some(effect) = queue.pop_front() {
            let follow_up = match effect {
                Effect::Fetch(query) => {
                    self.requests.push(format!("GET page={} search={}", query.page, query.search));
                    let response = self.list(&query);
                    controller.apply_list(&query, Ok(response))
                }
                Effect::Create(payload) => {
                    self.requests.push("POST".into());
                    let id = self.next_id;
                    self.next_id += 1;
                    let mut record = Record {
                        id: Some(id),
                        ..Record::default()
                    };
                    self.apply_payload(&mut record, &payload);
                    self.payloads.push(payload);
                    self.records.push(record);
                    controller.apply_submit(Ok(()))
                }
                Effect::Update { id, payload } => {
                    self.requests.push(format!("PUT {id}"));
                    let mut record = self
                        .records
                        .iter()
                        .find(|r| r.id == Some(id))
                        .cloned()
                        .expect("record exists");
                    self.apply_payload(&mut record, &payload);
                    self.payloads.push(payload);
                    self.records.retain(|r| r.id != Some(id));
                    self.records.push(record);
                    controller.apply_submit(Ok(()))
                }
                Effect::Delete { id } => {
                    self.requests.push(format!("DELETE {id}"));
                    self.records.retain(|r| r.id != Some(id));
                    controller.apply_remove(id, Ok(()))
                }
                Effect::Notify(notification) => {
                    notifications.push(notification);
                    Vec::new()
                }
                Effect::DismissNotification => Vec::new(),
            };
            queue.extend(follow_up);
        }
        notifications
    }

    fn list(&self, query: &ListQuery) -> ListResponse {
        let needle = query.search.to_lowercase();
        let matching: Vec<Record> = self
            .records
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.fields
                        .values()
                        .filter_map(Value::as_str)
                        .any(|v| v.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        let limit = query.limit as usize;
        let total_pages = matching.len().div_ceil(limit) as u32;
        let data = matching
            .iter()
            .skip((query.page as usize - 1) * limit)
            .take(limit)
            .cloned()
            .collect();
        ListResponse {
            data,
            pagination: PaginationInfo {
                current_page: query.page,
                total_pages,
                total_count: matching.len() as u64,
            },
        }
    }

    fn apply_payload(&self, record: &mut Record, payload: &Payload<TestFile>) {
        match payload {
            Payload::Json(values) => {
                for (name, value) in values {
                    record.fields.insert(name.clone(), value.clone());
                }
            }
            Payload::Multipart(form) => {
                for (name, value) in &form.fields {
                    if name == self.delete_flag {
                        record.fields.insert(self.asset_field.to_string(), Value::Null);
                    } else {
                        record.fields.insert(name.clone(), Value::String(value.clone()));
                    }
                }
                if let Some((name, file)) = &form.file {
                    record.fields.insert(name.clone(), Value::String(file.0.to_string()));
                }
            }
        }
    }
}

fn controller(kind: ResourceKind) -> Controller {
    ResourceController::new(kind.schema(), &AppConfig::default())
}

fn ids(controller: &Controller) -> Vec<i64> {
    controller.records().iter().filter_map(|r| r.id).collect()
}

#[test]
fn created_record_appears_after_refresh_and_surface_closes() {
    let mut backend = FakeBackend::for_kind(ResourceKind::LabCategories);
    let mut c = controller(ResourceKind::LabCategories);
    let effects = c.list(1, "");
    backend.run(&mut c, effects);
    assert!(c.records().is_empty());

    c.begin_create();
    c.set_field("category_name", "Microbiology");
    let effects = c.submit();
    let notes = backend.run(&mut c, effects);

    assert_eq!(notes, vec![Notification::success("Lab category created successfully")]);
    assert!(!c.is_surface_open());
    assert!(!c.is_saving());
    assert_eq!(c.records().len(), 1);
    assert_eq!(c.records()[0].text("category_name"), Some("Microbiology"));
    assert_eq!(backend.requests, vec!["GET page=1 search=", "POST", "GET page=1 search="]);
}

#[test]
fn removed_record_is_gone_after_refresh() {
    let mut backend = FakeBackend::for_kind(ResourceKind::LabCategories);
    let keep = backend.seed(json!({"category_name": "Physics"}));
    let gone = backend.seed(json!({"category_name": "Chemistry"}));
    let mut c = controller(ResourceKind::LabCategories);
    let effects = c.list(1, "");
    backend.run(&mut c, effects);
    assert_eq!(ids(&c), vec![keep, gone]);

    let effects = c.remove(gone, |_| true);
    assert_eq!(ids(&c), vec![keep, gone], "no optimistic removal");
    let notes = backend.run(&mut c, effects);

    assert_eq!(notes, vec![Notification::success("Lab category deleted successfully")]);
    assert_eq!(ids(&c), vec![keep]);
}

#[test]
fn declined_confirmation_sends_nothing() {
    let mut backend = FakeBackend::for_kind(ResourceKind::LabCategories);
    let id = backend.seed(json!({"category_name": "Physics"}));
    let mut c = controller(ResourceKind::LabCategories);
    let effects = c.remove(id, |_| false);
    backend.run(&mut c, effects);
    assert!(backend.requests.is_empty());
    assert_eq!(backend.records.len(), 1);
}

#[test]
fn invalid_program_never_reaches_the_backend() {
    let mut backend = FakeBackend::for_kind(ResourceKind::Programs);
    let mut c = controller(ResourceKind::Programs);
    c.begin_create();
    for (name, value) in [
        ("program_title", "Master of Science"),
        ("acronym", "MSC"),
        ("organisation_id", "1"),
        ("program_min_duration", "5"),
        ("program_max_duration", "4"),
        ("term_min_duration", "1"),
        ("term_max_duration", "2"),
        ("term_min_credits", "10"),
        ("term_max_credits", "20"),
        ("specializations", "Physics"),
        ("course_types", "Core"),
    ] {
        c.set_field(name, value);
    }
    let effects = c.submit();
    let notes = backend.run(&mut c, effects);

    assert!(backend.requests.is_empty());
    assert!(c.errors().contains("program_max_duration"));
    assert_eq!(c.errors().len(), 1);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Error);
    assert!(notes[0].text.contains("minimum duration"));
}

#[test]
fn deleting_an_existing_logo_sends_the_delete_flag() {
    let mut backend = FakeBackend::for_kind(ResourceKind::Organisations);
    let id = backend.seed(json!({
        "organisation_name": "Institute of Science",
        "acronym": "IOS",
        "email": "office@ios.edu",
        "mission": "Advance science education",
        "vision": "A world class institute",
        "logo": "ios.png"
    }));
    let mut c = controller(ResourceKind::Organisations);
    let effects = c.list(1, "");
    backend.run(&mut c, effects);

    let record = c.records()[0].clone();
    c.begin_edit(&record);
    assert_eq!(
        c.asset().preview_url(),
        Some("http://localhost:5000/uploads/logos/ios.png")
    );
    c.remove_asset();
    let effects = c.submit();
    assert!(matches!(effects.as_slice(), [Effect::Update { id: updated, .. }] if *updated == id));
    backend.run(&mut c, effects);

    let Payload::Multipart(form) = &backend.payloads[0] else {
        panic!("organisations submit multipart");
    };
    assert!(form.file.is_none());
    assert!(form.fields.contains(&("delete_logo".to_string(), "true".to_string())));

    let refreshed = &c.records()[0];
    assert_eq!(refreshed.text("logo"), None);
    c.begin_edit(&refreshed.clone());
    assert_eq!(c.asset().preview_url(), None);
}

#[test]
fn untouched_logo_is_not_sent_and_new_logo_is_attached() {
    let mut backend = FakeBackend::for_kind(ResourceKind::Organisations);
    backend.seed(json!({
        "organisation_name": "Institute of Arts",
        "acronym": "IOA",
        "email": "office@ioa.edu",
        "mission": "Advance the arts broadly",
        "vision": "Creative minds everywhere",
        "logo": "ioa.png"
    }));
    let mut c = controller(ResourceKind::Organisations);
    let effects = c.list(1, "");
    backend.run(&mut c, effects);

    let record = c.records()[0].clone();
    c.begin_edit(&record);
    let effects = c.submit();
    backend.run(&mut c, effects);
    let Payload::Multipart(form) = &backend.payloads[0] else {
        panic!("multipart expected");
    };
    assert!(form.file.is_none());
    assert!(!form.fields.iter().any(|(name, _)| name == "delete_logo"));
    assert_eq!(c.records()[0].text("logo"), Some("ioa.png"));

    let record = c.records()[0].clone();
    c.begin_edit(&record);
    let generation = c
        .select_asset(
            TestFile("new-logo.png"),
            FileMeta {
                name: "new-logo.png".into(),
                mime: "image/png".into(),
                size: 2048,
            },
        )
        .expect("png is accepted");
    assert!(c.set_asset_preview(generation, "data:image/png;base64,AAAA".into()));
    let effects = c.submit();
    backend.run(&mut c, effects);
    let Payload::Multipart(form) = &backend.payloads[1] else {
        panic!("multipart expected");
    };
    assert_eq!(form.file, Some(("logo".to_string(), TestFile("new-logo.png"))));
    assert_eq!(c.records()[0].text("logo"), Some("new-logo.png"));
}

#[test]
fn slow_first_search_does_not_overwrite_newer_results() {
    let mut backend = FakeBackend::for_kind(ResourceKind::LabCategories);
    backend.seed(json!({"category_name": "x-ray"}));
    backend.seed(json!({"category_name": "xylography"}));
    let mut c = controller(ResourceKind::LabCategories);

    let first = c.search("x");
    let second = c.search("xy");
    backend.run(&mut c, second);
    assert_eq!(c.records().len(), 1);
    backend.run(&mut c, first);

    assert_eq!(c.records().len(), 1);
    assert_eq!(c.records()[0].text("category_name"), Some("xylography"));
    assert!(!c.is_loading());
}

#[test]
fn duplicate_user_email_is_caught_locally() {
    let mut backend = FakeBackend::for_kind(ResourceKind::Users);
    backend.seed(json!({"full_name": "Ana", "email": "ana@uni.edu", "role": "staff"}));
    let mut c = controller(ResourceKind::Users);
    let effects = c.list(1, "");
    backend.run(&mut c, effects);

    c.begin_create();
    c.set_field("full_name", "Another Ana");
    c.set_field("email", "ANA@uni.edu");
    c.set_field("role", "faculty");
    let effects = c.submit();
    let notes = backend.run(&mut c, effects);
    assert_eq!(notes, vec![Notification::error("Email is already in use")]);
    assert_eq!(backend.requests.len(), 1);
}
