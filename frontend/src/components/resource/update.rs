//! Update function for the resource page.
//!
//! Every message is forwarded to the [`ResourceController`](common::controller::ResourceController);
//! the effects it returns are executed here. HTTP effects run on
//! `spawn_local` and report back as `Listed`, `Saved` or `Removed`; the
//! notification effects are raised to the shell through the page's props.

use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use common::controller::Effect;

use super::helpers::{confirm_in_browser, file_meta, read_preview, set_window_dirty_flag};
use super::messages::Msg;
use super::state::ResourcePage;

pub fn update(page: &mut ResourcePage, ctx: &Context<ResourcePage>, msg: Msg) -> bool {
    match msg {
        Msg::Listed(query, result) => {
            let effects = page.controller.apply_list(&query, result);
            run_effects(page, ctx, effects);
            true
        }
        Msg::Search(term) => {
            let effects = page.controller.search(&term);
            run_effects(page, ctx, effects);
            true
        }
        Msg::GoToPage(number) => {
            let effects = page.controller.go_to_page(number);
            run_effects(page, ctx, effects);
            true
        }
        Msg::NextPage => {
            let effects = page.controller.next_page();
            run_effects(page, ctx, effects);
            true
        }
        Msg::PrevPage => {
            let effects = page.controller.prev_page();
            run_effects(page, ctx, effects);
            true
        }

        Msg::Add => {
            let effects = page.controller.begin_create();
            page.mark_opened();
            clear_file_input(page);
            run_effects(page, ctx, effects);
            true
        }
        Msg::Edit(id) => {
            let gateway = page.gateway.clone();
            let endpoint = page.endpoint;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = gateway.get_by_id(endpoint, id).await;
                link.send_message(Msg::EditLoaded(id, result));
            });
            false
        }
        Msg::EditLoaded(id, result) => {
            // A failed detail fetch falls back to the row already on screen.
            let record = match result {
                Ok(mut record) => {
                    record.id.get_or_insert(id);
                    Some(record)
                }
                Err(failure) if failure.is_unauthorized() => None,
                Err(failure) => {
                    log::warn!("{}: detail fetch for {id} failed: {failure}", page.endpoint.path());
                    page.controller
                        .records()
                        .iter()
                        .find(|r| r.id == Some(id))
                        .cloned()
                }
            };
            let Some(record) = record else {
                return false;
            };
            let effects = page.controller.begin_edit(&record);
            page.mark_opened();
            clear_file_input(page);
            run_effects(page, ctx, effects);
            true
        }
        Msg::SetField(name, value) => {
            page.controller.set_field(name, value);
            set_window_dirty_flag(page.is_dirty());
            true
        }
        Msg::SetFlag(name, value) => {
            page.controller.set_flag(name, value);
            set_window_dirty_flag(page.is_dirty());
            true
        }
        Msg::Cancel => {
            page.controller.cancel_edit();
            page.opened_md5 = None;
            page.drag_over = false;
            set_window_dirty_flag(false);
            true
        }
        Msg::Submit => {
            let effects = page.controller.submit();
            run_effects(page, ctx, effects);
            true
        }
        Msg::Saved(result) => {
            let effects = page.controller.apply_submit(result);
            if !page.controller.is_surface_open() {
                page.opened_md5 = None;
                set_window_dirty_flag(false);
            }
            run_effects(page, ctx, effects);
            true
        }

        Msg::Delete(id) => {
            let effects = page.controller.remove(id, confirm_in_browser);
            run_effects(page, ctx, effects);
            false
        }
        Msg::Removed(id, result) => {
            let effects = page.controller.apply_remove(id, result);
            run_effects(page, ctx, effects);
            true
        }

        Msg::OpenFilePicker => {
            if let Some(input) = page.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FileSelected(file) => {
            page.drag_over = false;
            let meta = file_meta(&file);
            if let Some(generation) = page.controller.select_asset(file.clone(), meta) {
                spawn_preview(ctx, file, generation);
                set_window_dirty_flag(page.is_dirty());
            }
            true
        }
        Msg::PreviewReady {
            generation,
            data_url,
        } => page.controller.set_asset_preview(generation, data_url),
        Msg::RemoveAsset => {
            page.controller.remove_asset();
            clear_file_input(page);
            set_window_dirty_flag(page.is_dirty());
            true
        }
        Msg::DragOver(over) => {
            let changed = page.drag_over != over;
            page.drag_over = over;
            changed
        }
    }
}

/// Executes controller effects: HTTP requests go to the gateway, notification
/// effects go up to the shell.
pub(super) fn run_effects(page: &ResourcePage, ctx: &Context<ResourcePage>, effects: Vec<Effect<File>>) {
    for effect in effects {
        let gateway = page.gateway.clone();
        let endpoint = page.endpoint;
        let link = ctx.link().clone();
        match effect {
            Effect::Fetch(query) => spawn_local(async move {
                let result = gateway.list(endpoint, &query).await;
                link.send_message(Msg::Listed(query, result));
            }),
            Effect::Create(payload) => spawn_local(async move {
                let result = gateway.create(endpoint, payload).await;
                link.send_message(Msg::Saved(result));
            }),
            Effect::Update { id, payload } => spawn_local(async move {
                let result = gateway.update(endpoint, id, payload).await;
                link.send_message(Msg::Saved(result));
            }),
            Effect::Delete { id } => spawn_local(async move {
                let result = gateway.delete(endpoint, id).await;
                link.send_message(Msg::Removed(id, result));
            }),
            Effect::Notify(notification) => ctx.props().on_notify.emit(notification),
            Effect::DismissNotification => ctx.props().on_dismiss.emit(()),
        }
    }
}

fn spawn_preview(ctx: &Context<ResourcePage>, file: File, generation: u64) {
    let link = ctx.link().clone();
    spawn_local(async move {
        if let Some(data_url) = read_preview(file).await {
            link.send_message(Msg::PreviewReady {
                generation,
                data_url,
            });
        }
    });
}

fn clear_file_input(page: &ResourcePage) {
    if let Some(input) = page.file_input_ref.cast::<HtmlInputElement>() {
        input.set_value("");
    }
}
