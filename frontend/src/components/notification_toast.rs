//! Fixed-position toast showing the shell's active notification.
//!
//! Success toasts carry a shrinking progress bar fed by the shell's
//! countdown; error toasts stay until closed.

use yew::{classes, html, Callback, Component, Context, Html, Properties};

use common::model::notification::{Notification, NotificationKind};

#[derive(Properties, PartialEq)]
pub struct NotificationToastProps {
    pub notification: Option<Notification>,
    /// Remaining fraction of the countdown, `None` for errors.
    #[prop_or_default]
    pub progress: Option<f32>,
    pub on_close: Callback<()>,
}

pub struct NotificationToast;

impl Component for NotificationToast {
    type Message = ();
    type Properties = NotificationToastProps;

    fn create(_ctx: &Context<Self>) -> Self {
        NotificationToast
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let Some(notification) = &props.notification else {
            return html! {};
        };
        let (kind_class, icon) = match notification.kind {
            NotificationKind::Success => ("toast-success", "check_circle"),
            NotificationKind::Error => ("toast-error", "error"),
        };
        let on_close = props.on_close.reform(|_| ());

        html! {
            <div class={classes!("toast", kind_class)} role="status">
                <span class="material-icons">{ icon }</span>
                <span class="toast-text">{ notification.text.clone() }</span>
                <button class="icon-btn" title="Close" onclick={on_close}>
                    <span class="material-icons">{ "close" }</span>
                </button>
                if let Some(progress) = props.progress {
                    <div
                        class="toast-progress"
                        style={format!("width: {:.1}%;", progress.clamp(0.0, 1.0) * 100.0)}
                    />
                }
            </div>
        }
    }
}
