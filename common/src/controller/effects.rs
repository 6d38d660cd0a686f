use crate::api::ListQuery;
use crate::model::notification::Notification;
use crate::payload::Payload;

/// Work the controller asks its host to perform. Results of the HTTP
/// effects are fed back through the controller's `apply_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<F> {
    Fetch(ListQuery),
    Create(Payload<F>),
    Update { id: i64, payload: Payload<F> },
    Delete { id: i64 },
    Notify(Notification),
    DismissNotification,
}

impl<F> Effect<F> {
    /// True for effects that reach the network.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Effect::Fetch(_) | Effect::Create(_) | Effect::Update { .. } | Effect::Delete { .. }
        )
    }
}
