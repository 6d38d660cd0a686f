//! Application shell: tab bar over the resource catalogue, the active
//! resource page and the notification toast.
//!
//! The shell owns the [`NotificationCenter`]. Pages raise notifications
//! through callbacks; the shell runs the success countdown with a 100 ms
//! interval and a 3000 ms expiry, both dropped (and so cancelled) whenever
//! the notification is replaced, dismissed or the shell is torn down.

use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use yew::{classes, html, html::Scope, Component, Context, Html, Properties};

use common::config::AppConfig;
use common::model::notification::Notification;
use common::notification::{NotificationCenter, NotificationId, SUCCESS_TTL_MS, TICK_MS};
use common::schema::ResourceKind;

use crate::components::notification_toast::NotificationToast;
use crate::components::resource::ResourcePage;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<AppConfig>,
}

pub enum Msg {
    SelectTab(ResourceKind),
    Notify(Notification),
    Dismiss,
    Tick(NotificationId),
    Expire(NotificationId),
}

pub struct App {
    active: ResourceKind,
    notifications: NotificationCenter,
    ticker: Option<Interval>,
    expiry: Option<Timeout>,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            active: ResourceKind::LabCategories,
            notifications: NotificationCenter::default(),
            ticker: None,
            expiry: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectTab(kind) => {
                if kind == self.active || !confirm_discard() {
                    return false;
                }
                self.active = kind;
                true
            }
            Msg::Notify(notification) => {
                self.stop_timers();
                let counts_down = notification.is_success();
                let id = self.notifications.enqueue(notification);
                if counts_down {
                    self.start_timers(ctx.link(), id);
                }
                true
            }
            Msg::Dismiss => {
                self.stop_timers();
                self.notifications.dismiss()
            }
            Msg::Tick(id) => {
                let changed = self.notifications.tick(id);
                if self.notifications.current_id() != Some(id) {
                    self.stop_timers();
                }
                changed
            }
            Msg::Expire(id) => {
                let changed = self.notifications.expire(id);
                if changed {
                    self.stop_timers();
                }
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let active = self.active;

        html! {
            <div class="app-shell">
                { build_tab_bar(active, link) }
                <main class="app-content">
                    <ResourcePage
                        key={active.slug()}
                        kind={active}
                        config={ctx.props().config.clone()}
                        on_notify={link.callback(Msg::Notify)}
                        on_dismiss={link.callback(|_| Msg::Dismiss)}
                    />
                </main>
                <NotificationToast
                    notification={self.notifications.current().cloned()}
                    progress={self.notifications.progress()}
                    on_close={link.callback(|_| Msg::Dismiss)}
                />
            </div>
        }
    }
}

impl App {
    fn start_timers(&mut self, link: &Scope<Self>, id: NotificationId) {
        let tick_link = link.clone();
        self.ticker = Some(Interval::new(TICK_MS, move || {
            tick_link.send_message(Msg::Tick(id));
        }));
        let expire_link = link.clone();
        self.expiry = Some(Timeout::new(SUCCESS_TTL_MS, move || {
            expire_link.send_message(Msg::Expire(id));
        }));
    }

    fn stop_timers(&mut self) {
        self.ticker = None;
        self.expiry = None;
    }
}

fn build_tab_bar(active: ResourceKind, link: &Scope<App>) -> Html {
    html! {
        <nav class="tab-bar">
            { for ResourceKind::ALL.iter().map(|&kind| html! {
                <button
                    class={classes!("tab-btn", (kind == active).then_some("active"))}
                    onclick={link.callback(move |_| Msg::SelectTab(kind))}
                >
                    { kind.title() }
                </button>
            }) }
        </nav>
    }
}

/// Asks before leaving a page whose edit sheet holds unsaved changes.
fn confirm_discard() -> bool {
    let Some(window) = web_sys::window() else {
        return true;
    };
    let dirty = Reflect::get(&window, &JsValue::from_str("app_dirty"))
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false);
    !dirty
        || window
            .confirm_with_message("You have unsaved changes. Discard them?")
            .unwrap_or(false)
}
