use serde::{Deserialize, Serialize};

use crate::model::record::Record;

/// Pagination block of a list response, as sent by the backend.
///
/// Field names vary between endpoints (`current_page` vs `currentPage`), so
/// both spellings are accepted. `has_next`/`has_prev` are deliberately not
/// read; they are derived in [`PaginationState`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    #[serde(default, alias = "currentPage", alias = "page")]
    pub current_page: u32,
    #[serde(default, alias = "totalPages")]
    pub total_pages: u32,
    #[serde(default, alias = "totalCount", alias = "total", alias = "totalItems")]
    pub total_count: u64,
}

/// Body of every paginated list endpoint: `{ data, pagination }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub pagination: PaginationInfo,
}

/// Client-side pagination cursor.
///
/// Invariant: `has_next == current_page < total_pages` and
/// `has_prev == current_page > 1`. Only the constructors below build it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl PaginationState {
    pub fn new(current_page: u32, total_pages: u32, total_count: u64) -> Self {
        let current_page = current_page.max(1);
        Self {
            current_page,
            total_pages,
            total_count,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    /// Builds the cursor from the wire block. `requested_page` is used when
    /// the backend omits the current page.
    pub fn from_info(info: &PaginationInfo, requested_page: u32) -> Self {
        let page = if info.current_page == 0 {
            requested_page
        } else {
            info.current_page
        };
        Self::new(page, info.total_pages, info.total_count)
    }

    /// Same totals, different page.
    pub fn at_page(&self, page: u32) -> Self {
        Self::new(page, self.total_pages, self.total_count)
    }

    /// Highest page that can be requested; an empty result set still has page 1.
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flags_follow_page_position() {
        let first = PaginationState::new(1, 3, 25);
        assert!(first.has_next && !first.has_prev);

        let middle = first.at_page(2);
        assert!(middle.has_next && middle.has_prev);

        let last = first.at_page(3);
        assert!(!last.has_next && last.has_prev);
    }

    #[test]
    fn wire_flags_are_ignored_and_camel_case_is_accepted() {
        let response: ListResponse = serde_json::from_value(json!({
            "data": [{"id": 1}],
            "pagination": {"currentPage": 2, "totalPages": 2, "totalCount": 11, "hasNext": true}
        }))
        .unwrap();

        let state = PaginationState::from_info(&response.pagination, 1);
        assert_eq!(state.current_page, 2);
        assert!(!state.has_next);
        assert!(state.has_prev);
        assert_eq!(state.total_count, 11);
    }

    #[test]
    fn missing_current_page_falls_back_to_request() {
        let info = PaginationInfo {
            current_page: 0,
            total_pages: 4,
            total_count: 40,
        };
        assert_eq!(PaginationState::from_info(&info, 3).current_page, 3);
    }
}
