//! REST conventions shared by every resource.
//!
//! Endpoints follow `/{domain}/{resource}` with standard verbs: `GET` on the
//! collection (paginated, `page`/`limit`/`search` query), `GET`/`PUT`/`DELETE`
//! on `/{id}`, `POST` on the collection. The HTTP transport itself lives in
//! the frontend; this module only knows paths and query parameters.

pub mod error;

pub use error::{ApiErrorBody, ApiFailure, FieldErrorBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub domain: &'static str,
    pub resource: &'static str,
}

impl Endpoint {
    pub const fn new(domain: &'static str, resource: &'static str) -> Self {
        Self { domain, resource }
    }

    pub fn path(&self) -> String {
        format!("/{}/{}", self.domain, self.resource)
    }

    pub fn collection_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.path())
    }

    pub fn item_url(&self, base_url: &str, id: i64) -> String {
        format!("{}{}/{}", base_url, self.path(), id)
    }
}

/// One paginated list request. `seq` orders overlapping requests so that a
/// slow, older response cannot overwrite a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub seq: u64,
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

impl ListQuery {
    /// Query-string pairs. `search` is omitted when blank.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        params
    }
}
