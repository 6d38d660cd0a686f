//! Runtime state of a resource page.
//!
//! All CRUD state lives in the shared [`ResourceController`]; this struct only
//! adds what the browser needs around it: the HTTP gateway, DOM refs, the
//! drag-over highlight and the fingerprint of the draft as it was when the
//! edit sheet opened.

use yew::prelude::*;

use common::api::Endpoint;
use common::controller::ResourceController;

use crate::api::ApiGateway;

use super::helpers::draft_fingerprint;
use super::props::ResourcePageProps;

pub struct ResourcePage {
    pub controller: ResourceController<web_sys::File>,
    pub gateway: ApiGateway,
    pub endpoint: Endpoint,

    /// Hidden `<input type="file">` behind the dropzone.
    pub file_input_ref: NodeRef,

    /// True while a file is dragged over the dropzone.
    pub drag_over: bool,

    /// MD5 of the serialized draft when the sheet was opened. `None` while
    /// the sheet is closed.
    pub opened_md5: Option<String>,

    /// Guard for the initial fetch in `rendered`.
    pub loaded: bool,
}

impl ResourcePage {
    pub fn new(props: &ResourcePageProps) -> Self {
        let schema = props.kind.schema();
        let endpoint = schema.endpoint;
        Self {
            controller: ResourceController::new(schema, &props.config),
            gateway: ApiGateway::new(&props.config),
            endpoint,
            file_input_ref: NodeRef::default(),
            drag_over: false,
            opened_md5: None,
            loaded: false,
        }
    }

    /// True when the open draft differs from what the sheet was opened with,
    /// or when it would add, replace or delete the asset.
    pub fn is_dirty(&self) -> bool {
        self.opened_md5.as_ref().is_some_and(|opened| {
            self.controller.has_asset_change()
                || opened != &draft_fingerprint(self.controller.draft())
        })
    }

    /// Records the current draft as the clean baseline.
    pub fn mark_opened(&mut self) {
        self.opened_md5 = self
            .controller
            .is_surface_open()
            .then(|| draft_fingerprint(self.controller.draft()));
    }
}
