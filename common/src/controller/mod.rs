//! Generic CRUD life-cycle for one resource.
//!
//! [`ResourceController`] owns everything a resource screen shows: the
//! current page of records, the pagination cursor, the search term, the form
//! draft with its validation errors, the uploaded asset and the in-flight
//! flags. It performs no I/O. Each operation mutates state and returns the
//! [`Effect`]s the host must run; the host reports outcomes back through
//! [`apply_list`](ResourceController::apply_list),
//! [`apply_submit`](ResourceController::apply_submit) and
//! [`apply_remove`](ResourceController::apply_remove).
//!
//! `F` is the platform file handle used for uploads.

mod effects;

pub use effects::Effect;

use log::{debug, info, warn};

use crate::api::{ApiFailure, ListQuery};
use crate::config::AppConfig;
use crate::model::asset::{AssetChange, AssetSlot, AssetUrlCache, FileMeta, check_file, resolve_asset_url};
use crate::model::draft::Draft;
use crate::model::notification::Notification;
use crate::model::pagination::{ListResponse, PaginationState};
use crate::model::record::Record;
use crate::payload::build_payload;
use crate::schema::ResourceSchema;
use crate::validation::{ValidationContext, ValidationErrors, validate_draft};

/// The edit session a dispatched save belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSave {
    session: u64,
    target: Option<i64>,
}

pub struct ResourceController<F> {
    schema: ResourceSchema,
    static_base_url: String,
    page_limit: u32,

    records: Vec<Record>,
    pagination: PaginationState,
    search_term: String,

    draft: Draft,
    editing_id: Option<i64>,
    errors: ValidationErrors,
    surface_open: bool,

    asset: AssetSlot<F>,
    asset_error: Option<String>,
    asset_urls: AssetUrlCache,

    loading: bool,
    saving: bool,
    /// Bumped whenever the edit surface is opened or closed.
    session: u64,
    pending_save: Option<PendingSave>,
    last_issued: u64,
    last_applied: u64,
}

impl<F: Clone> ResourceController<F> {
    pub fn new(schema: ResourceSchema, config: &AppConfig) -> Self {
        let draft = Draft::defaults(&schema);
        Self {
            schema,
            static_base_url: config.static_base_url().to_string(),
            page_limit: config.page_limit(),
            records: Vec::new(),
            pagination: PaginationState::default(),
            search_term: String::new(),
            draft,
            editing_id: None,
            errors: ValidationErrors::default(),
            surface_open: false,
            asset: AssetSlot::default(),
            asset_error: None,
            asset_urls: AssetUrlCache::default(),
            loading: false,
            saving: false,
            session: 0,
            pending_save: None,
            last_issued: 0,
            last_applied: 0,
        }
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_surface_open(&self) -> bool {
        self.surface_open
    }

    pub fn asset(&self) -> &AssetSlot<F> {
        &self.asset
    }

    pub fn asset_error(&self) -> Option<&str> {
        self.asset_error.as_deref()
    }

    pub fn asset_urls(&self) -> &AssetUrlCache {
        &self.asset_urls
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// True when the open draft would add, replace or delete the asset.
    pub fn has_asset_change(&self) -> bool {
        !matches!(self.asset.change(), AssetChange::Keep)
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Requests `page` of the records matching `search`.
    pub fn list(&mut self, page: u32, search: &str) -> Vec<Effect<F>> {
        self.loading = true;
        self.last_issued += 1;
        let query = ListQuery {
            seq: self.last_issued,
            page: page.max(1),
            limit: self.page_limit,
            search: search.to_string(),
        };
        debug!(
            "{}: fetching page {} (seq {}, search {:?})",
            self.schema.endpoint.path(),
            query.page,
            query.seq,
            query.search
        );
        vec![Effect::Fetch(query)]
    }

    /// Re-fetches the current page with the current search term.
    pub fn refresh(&mut self) -> Vec<Effect<F>> {
        let search = self.search_term.clone();
        self.list(self.pagination.current_page, &search)
    }

    pub fn apply_list(
        &mut self,
        query: &ListQuery,
        result: Result<ListResponse, ApiFailure>,
    ) -> Vec<Effect<F>> {
        if query.seq == self.last_issued {
            self.loading = false;
        }
        if query.seq < self.last_applied {
            debug!(
                "{}: discarding stale response (seq {} < {})",
                self.schema.endpoint.path(),
                query.seq,
                self.last_applied
            );
            return Vec::new();
        }

        match result {
            Ok(response) => {
                self.last_applied = query.seq;
                let pagination = PaginationState::from_info(&response.pagination, query.page);
                let overshoot = response.data.is_empty()
                    && pagination.total_pages >= 1
                    && pagination.current_page > pagination.total_pages;
                self.records = response.data;
                self.pagination = pagination;
                if overshoot {
                    let last = pagination.last_page();
                    return self.list(last, &query.search);
                }
                Vec::new()
            }
            Err(failure) if failure.is_unauthorized() => Vec::new(),
            Err(failure) => {
                warn!("{}: list failed: {failure}", self.schema.endpoint.path());
                let fallback = format!("Failed to load {}", self.schema.plural);
                vec![Effect::Notify(Notification::error(
                    failure.user_message(&fallback),
                ))]
            }
        }
    }

    pub fn search(&mut self, term: &str) -> Vec<Effect<F>> {
        self.search_term = term.to_string();
        self.list(1, term)
    }

    pub fn go_to_page(&mut self, page: u32) -> Vec<Effect<F>> {
        let page = page.clamp(1, self.pagination.last_page());
        let search = self.search_term.clone();
        self.list(page, &search)
    }

    pub fn next_page(&mut self) -> Vec<Effect<F>> {
        if !self.pagination.has_next {
            return Vec::new();
        }
        self.go_to_page(self.pagination.current_page + 1)
    }

    pub fn prev_page(&mut self) -> Vec<Effect<F>> {
        if !self.pagination.has_prev {
            return Vec::new();
        }
        self.go_to_page(self.pagination.current_page - 1)
    }

    // ── Editing ──────────────────────────────────────────────────────

    pub fn begin_create(&mut self) -> Vec<Effect<F>> {
        self.draft = Draft::defaults(&self.schema);
        self.editing_id = None;
        self.errors = ValidationErrors::default();
        self.asset.reset();
        self.asset_error = None;
        self.surface_open = true;
        self.session += 1;
        vec![Effect::DismissNotification]
    }

    pub fn begin_edit(&mut self, record: &Record) -> Vec<Effect<F>> {
        self.draft = Draft::from_record(&self.schema, record);
        self.editing_id = record.id;
        self.errors = ValidationErrors::default();
        self.asset_error = None;

        if let Some(spec) = &self.schema.asset {
            let cached = record
                .id
                .and_then(|id| self.asset_urls.get(id).map(str::to_string));
            let url = cached.or_else(|| {
                record
                    .text(spec.field)
                    .and_then(|stored| {
                        resolve_asset_url(&self.static_base_url, stored, spec.convention)
                    })
            });
            if let (Some(id), Some(url)) = (record.id, &url) {
                self.asset_urls.insert(id, url.clone());
            }
            self.asset.load_existing(url);
        } else {
            self.asset.reset();
        }

        self.surface_open = true;
        self.session += 1;
        vec![Effect::DismissNotification]
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.draft.set_text(name, value);
        self.errors.clear_field(name);
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.draft.set_flag(name, value);
        self.errors.clear_field(name);
    }

    /// Closes the edit surface and discards the draft.
    pub fn cancel_edit(&mut self) {
        self.surface_open = false;
        self.session += 1;
        self.draft = Draft::defaults(&self.schema);
        self.errors = ValidationErrors::default();
        if let Some(id) = self.editing_id.take() {
            self.asset_urls.remove(id);
        }
        self.asset.reset();
        self.asset_error = None;
    }

    // ── Assets ───────────────────────────────────────────────────────

    /// Accepts a newly selected file after type and size checks. Returns the
    /// selection generation to hand back with the preview, or `None` when
    /// the file was rejected (see [`asset_error`](Self::asset_error)).
    pub fn select_asset(&mut self, file: F, meta: FileMeta) -> Option<u64> {
        let spec = self.schema.asset.as_ref()?;
        if let Err(err) = check_file(spec, &meta) {
            self.asset_error = Some(err.to_string());
            return None;
        }
        self.asset_error = None;
        if let Some(id) = self.editing_id {
            self.asset_urls.remove(id);
        }
        Some(self.asset.select(file, meta.name))
    }

    pub fn set_asset_preview(&mut self, generation: u64, data_url: String) -> bool {
        self.asset.set_preview(generation, data_url)
    }

    pub fn remove_asset(&mut self) {
        self.asset.remove();
        self.asset_error = None;
        if let Some(id) = self.editing_id {
            self.asset_urls.remove(id);
        }
    }

    // ── Submitting ───────────────────────────────────────────────────

    /// Recomputes validation errors for the whole draft.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_draft(
            &self.schema,
            &self.draft,
            ValidationContext {
                records: &self.records,
                editing_id: self.editing_id,
            },
        );
        self.errors.is_empty()
    }

    pub fn submit(&mut self) -> Vec<Effect<F>> {
        if self.saving {
            return Vec::new();
        }
        if !self.validate() {
            let headline = self
                .errors
                .first()
                .unwrap_or("Please correct the highlighted fields")
                .to_string();
            return vec![Effect::Notify(Notification::error(headline))];
        }

        self.saving = true;
        self.pending_save = Some(PendingSave {
            session: self.session,
            target: self.editing_id,
        });
        let payload = build_payload(
            &self.schema,
            &self.draft,
            self.asset.change(),
            self.editing_id.is_some(),
        );
        match self.editing_id {
            Some(id) => {
                info!("{}: updating record {id}", self.schema.endpoint.path());
                vec![Effect::Update { id, payload }]
            }
            None => {
                info!("{}: creating record", self.schema.endpoint.path());
                vec![Effect::Create(payload)]
            }
        }
    }

    /// Completes the save dispatched by [`submit`](Self::submit). The edit
    /// surface is only closed when it still shows the session that was
    /// saved; a surface reopened meanwhile is left untouched.
    pub fn apply_submit(&mut self, result: Result<(), ApiFailure>) -> Vec<Effect<F>> {
        self.saving = false;
        let pending = self.pending_save.take().unwrap_or(PendingSave {
            session: self.session,
            target: self.editing_id,
        });
        match result {
            Ok(()) => {
                let verb = if pending.target.is_some() {
                    "updated"
                } else {
                    "created"
                };
                let message = format!("{} {verb} successfully", self.schema.singular);
                if pending.session == self.session {
                    self.cancel_edit();
                } else {
                    debug!(
                        "{}: save finished after its edit session closed",
                        self.schema.endpoint.path()
                    );
                }
                let mut effects = vec![Effect::Notify(Notification::success(message))];
                effects.extend(self.refresh());
                effects
            }
            Err(failure) if failure.is_unauthorized() => Vec::new(),
            Err(failure) => {
                warn!("{}: save failed: {failure}", self.schema.endpoint.path());
                let fallback = format!("Failed to save {}", self.schema.singular.to_lowercase());
                vec![Effect::Notify(Notification::error(
                    failure.user_message(&fallback),
                ))]
            }
        }
    }

    // ── Deleting ─────────────────────────────────────────────────────

    /// Deletes record `id` once `confirm` approves the prompt it is given.
    /// Nothing is removed locally until the backend confirms.
    pub fn remove(&mut self, id: i64, confirm: impl FnOnce(&str) -> bool) -> Vec<Effect<F>> {
        let prompt = format!(
            "Are you sure you want to delete this {}?",
            self.schema.singular.to_lowercase()
        );
        if !confirm(&prompt) {
            return Vec::new();
        }
        info!("{}: deleting record {id}", self.schema.endpoint.path());
        vec![Effect::Delete { id }]
    }

    pub fn apply_remove(&mut self, id: i64, result: Result<(), ApiFailure>) -> Vec<Effect<F>> {
        match result {
            Ok(()) => {
                self.asset_urls.remove(id);
                let message = format!("{} deleted successfully", self.schema.singular);
                let mut effects = vec![Effect::Notify(Notification::success(message))];
                effects.extend(self.refresh());
                effects
            }
            Err(failure) if failure.is_unauthorized() => Vec::new(),
            Err(failure) => {
                warn!("{}: delete of {id} failed: {failure}", self.schema.endpoint.path());
                let fallback = format!("Failed to delete {}", self.schema.singular.to_lowercase());
                vec![Effect::Notify(Notification::error(
                    failure.user_message(&fallback),
                ))]
            }
        }
    }
}
