//! Properties of a [`ResourcePage`](super::ResourcePage).

use std::rc::Rc;

use yew::prelude::*;

use common::config::AppConfig;
use common::model::notification::Notification;
use common::schema::ResourceKind;

#[derive(Properties, PartialEq, Clone)]
pub struct ResourcePageProps {
    /// Which catalogue entry this page administers. The shell keys pages by
    /// slug, so a change of kind mounts a fresh page.
    pub kind: ResourceKind,
    pub config: Rc<AppConfig>,
    /// Raised for every success or error message; the shell owns display.
    pub on_notify: Callback<Notification>,
    pub on_dismiss: Callback<()>,
}
