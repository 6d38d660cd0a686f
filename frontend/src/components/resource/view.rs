//! View rendering for the resource page: toolbar with search, the records
//! grid, the pagination footer and the edit sheet with its form.
//!
//! Forms are generated from the resource schema. Each field kind maps to one
//! input widget; errors are shown under the field they belong to.

use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use common::model::asset::{resolve_asset_url, AssetSource};
use common::schema::{AssetSpec, AssetUrlConvention, FieldKind, FieldSpec};

use crate::edit_sheet::EditSheet;
use crate::records_grid::{GridRow, RecordsGrid};

use super::messages::Msg;
use super::state::ResourcePage;

pub fn view(page: &ResourcePage, ctx: &Context<ResourcePage>) -> Html {
    let link = ctx.link();
    let controller = &page.controller;
    let schema = controller.schema();
    let title = match controller.editing_id() {
        Some(_) => format!("Edit {}", schema.singular),
        None => format!("Add {}", schema.singular),
    };

    html! {
        <section class="resource-page">
            { build_toolbar(page, ctx) }
            { build_grid(page, ctx) }
            { build_pagination(page, link) }
            <EditSheet open={controller.is_surface_open()} title={title} dirty={page.is_dirty()}>
                { build_form(page, link) }
            </EditSheet>
        </section>
    }
}

fn build_toolbar(page: &ResourcePage, ctx: &Context<ResourcePage>) -> Html {
    let link = ctx.link();
    let controller = &page.controller;
    let schema = controller.schema();
    let placeholder = format!("Search {}", schema.plural.to_lowercase());

    html! {
        <div class="resource-toolbar">
            <h2>{ ctx.props().kind.title() }</h2>
            <input
                type="search"
                class="search-input"
                placeholder={placeholder}
                value={controller.search_term().to_string()}
                oninput={link.callback(|e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::Search(input.value())
                })}
            />
            if controller.is_loading() {
                <span class="spinner" title="Loading" />
            }
            <button class="primary-btn" onclick={link.callback(|_| Msg::Add)}>
                <span class="material-icons">{ "add" }</span>
                { format!("Add {}", schema.singular) }
            </button>
        </div>
    }
}

fn build_grid(page: &ResourcePage, ctx: &Context<ResourcePage>) -> Html {
    let link = ctx.link();
    let controller = &page.controller;
    let schema = controller.schema();
    let static_base = ctx.props().config.static_base_url().to_string();

    let headers = schema
        .columns
        .iter()
        .map(|column| schema.label_of(column).to_string())
        .collect::<Vec<_>>();

    let rows = controller
        .records()
        .iter()
        .filter_map(|record| {
            let id = record.id?;
            let cells = schema
                .columns
                .iter()
                .map(|column| match schema.field(column).map(|f| &f.kind) {
                    Some(FieldKind::Boolean) => match record.flag(column) {
                        Some(true) => "Yes".to_string(),
                        Some(false) => "No".to_string(),
                        None => String::new(),
                    },
                    _ => record.display(column),
                })
                .collect();
            let asset_url = schema.asset.as_ref().and_then(|spec| {
                controller.asset_urls().get(id).map(str::to_string).or_else(|| {
                    record
                        .text(spec.field)
                        .and_then(|stored| resolve_asset_url(&static_base, stored, spec.convention))
                })
            });
            Some(GridRow {
                id,
                cells,
                asset_url,
            })
        })
        .collect::<Vec<_>>();

    html! {
        <RecordsGrid
            headers={headers}
            rows={rows}
            asset_header={schema.asset.as_ref().map(|spec| spec.label.to_string())}
            asset_is_image={schema.asset.as_ref().is_some_and(|spec| spec.convention == AssetUrlConvention::LogoDirectory)}
            loading={controller.is_loading()}
            empty_text={format!("No {} found", schema.plural.to_lowercase())}
            on_edit={link.callback(Msg::Edit)}
            on_delete={link.callback(Msg::Delete)}
        />
    }
}

fn build_pagination(page: &ResourcePage, link: &Scope<ResourcePage>) -> Html {
    let pagination = page.controller.pagination();
    let total = pagination.total_count.to_formatted_string(&Locale::en);
    let noun = if pagination.total_count == 1 {
        page.controller.schema().singular.to_lowercase()
    } else {
        page.controller.schema().plural.to_lowercase()
    };

    html! {
        <footer class="pagination">
            <span class="pagination-total">{ format!("{total} {noun}") }</span>
            <button
                class="icon-btn"
                title="First page"
                disabled={!pagination.has_prev}
                onclick={link.callback(|_| Msg::GoToPage(1))}
            >
                <span class="material-icons">{ "first_page" }</span>
            </button>
            <button
                class="icon-btn"
                title="Previous page"
                disabled={!pagination.has_prev}
                onclick={link.callback(|_| Msg::PrevPage)}
            >
                <span class="material-icons">{ "chevron_left" }</span>
            </button>
            <span class="pagination-current">
                { format!("Page {} of {}", pagination.current_page, pagination.last_page()) }
            </span>
            <button
                class="icon-btn"
                title="Next page"
                disabled={!pagination.has_next}
                onclick={link.callback(|_| Msg::NextPage)}
            >
                <span class="material-icons">{ "chevron_right" }</span>
            </button>
            <button
                class="icon-btn"
                title="Last page"
                disabled={!pagination.has_next}
                onclick={link.callback(move |_| Msg::GoToPage(pagination.last_page()))}
            >
                <span class="material-icons">{ "last_page" }</span>
            </button>
        </footer>
    }
}

fn build_form(page: &ResourcePage, link: &Scope<ResourcePage>) -> Html {
    let controller = &page.controller;
    let schema = controller.schema();
    let saving = controller.is_saving();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <form class="resource-form" onsubmit={onsubmit} novalidate={true}>
            { for schema.fields.iter().map(|field| build_field(page, link, field)) }
            if let Some(spec) = &schema.asset {
                { build_dropzone(page, link, spec) }
            }
            <div class="form-actions">
                <button type="button" class="secondary-btn" onclick={link.callback(|_| Msg::Cancel)}>
                    { "Cancel" }
                </button>
                <button type="submit" class="primary-btn" disabled={saving}>
                    { if saving { "Saving..." } else { "Save" } }
                </button>
            </div>
        </form>
    }
}

fn build_field(page: &ResourcePage, link: &Scope<ResourcePage>, field: &FieldSpec) -> Html {
    let controller = &page.controller;
    let draft = controller.draft();
    let error = controller.errors().get(field.name).map(str::to_string);
    let name = field.name;
    let input_id = format!("field-{name}");

    let text_input = |input_type: &'static str| {
        html! {
            <input
                id={input_id.clone()}
                type={input_type}
                class={classes!("form-input", error.is_some().then_some("invalid"))}
                value={draft.text(name).to_string()}
                oninput={link.callback(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::SetField(name, input.value())
                })}
            />
        }
    };

    let widget = match &field.kind {
        FieldKind::Text | FieldKind::CommaList => text_input("text"),
        FieldKind::Email => text_input("email"),
        FieldKind::Integer => text_input("number"),
        FieldKind::LongText => html! {
            <textarea
                id={input_id.clone()}
                class={classes!("form-input", error.is_some().then_some("invalid"))}
                rows="4"
                value={draft.text(name).to_string()}
                oninput={link.callback(move |e: InputEvent| {
                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                    Msg::SetField(name, input.value())
                })}
            />
        },
        FieldKind::Boolean => html! {
            <input
                id={input_id.clone()}
                type="checkbox"
                checked={draft.flag(name)}
                onchange={link.callback(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::SetFlag(name, input.checked())
                })}
            />
        },
        FieldKind::Select(options) => {
            let current = draft.text(name).to_string();
            html! {
                <select
                    id={input_id.clone()}
                    class={classes!("form-input", error.is_some().then_some("invalid"))}
                    onchange={link.callback(move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        Msg::SetField(name, select.value())
                    })}
                >
                    <option value="" selected={current.is_empty()}>{ "Select..." }</option>
                    { for options.iter().map(|option| html! {
                        <option value={*option} selected={current == *option}>{ *option }</option>
                    }) }
                </select>
            }
        }
    };

    html! {
        <div class={classes!("form-field", field.is_flag().then_some("form-field-inline"))}>
            <label for={input_id.clone()}>
                { field.label }
                if field.required {
                    <span class="required">{ " *" }</span>
                }
            </label>
            { widget }
            if let Some(hint) = field.hint {
                <small class="form-hint">{ hint }</small>
            }
            if let Some(error) = error {
                <small class="form-error">{ error }</small>
            }
        </div>
    }
}

fn build_dropzone(page: &ResourcePage, link: &Scope<ResourcePage>, spec: &AssetSpec) -> Html {
    let controller = &page.controller;
    let accept = spec.accept.join(",");
    let max_mb = spec.max_bytes / (1024 * 1024);
    let shows_image = spec.convention == AssetUrlConvention::LogoDirectory;

    let ondragover = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::DragOver(true)
    });
    let ondragleave = link.callback(|_: DragEvent| Msg::DragOver(false));
    let ondrop = link.batch_callback(|e: DragEvent| {
        e.prevent_default();
        let file = e
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        match file {
            Some(file) => vec![Msg::FileSelected(file)],
            None => vec![Msg::DragOver(false)],
        }
    });
    let onchange = link.batch_callback(|e: Event| {
        let input = e
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok());
        input
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(Msg::FileSelected)
    });

    let current = match controller.asset().source() {
        AssetSource::Empty => html! {
            <p class="muted">{ format!("No {} uploaded", spec.label.to_lowercase()) }</p>
        },
        AssetSource::Existing { url } => html! {
            <div class="asset-current">
                if shows_image {
                    <img class="asset-preview" src={url.clone()} alt={spec.label} />
                } else {
                    <a href={url.clone()} target="_blank" rel="noopener">
                        { format!("View current {}", spec.label.to_lowercase()) }
                    </a>
                }
                <button type="button" class="secondary-btn" onclick={link.callback(|_| Msg::RemoveAsset)}>
                    { format!("Remove {}", spec.label.to_lowercase()) }
                </button>
            </div>
        },
        AssetSource::Selected { name, preview, .. } => html! {
            <div class="asset-current">
                if let Some(preview) = preview.as_ref().filter(|p| p.starts_with("data:image/")) {
                    <img class="asset-preview" src={preview.clone()} alt={name.clone()} />
                }
                <span class="asset-name">{ name.clone() }</span>
                <button type="button" class="secondary-btn" onclick={link.callback(|_| Msg::RemoveAsset)}>
                    { "Remove" }
                </button>
            </div>
        },
    };

    html! {
        <div class="form-field">
            <label>{ spec.label }</label>
            <div
                class={classes!("dropzone", page.drag_over.then_some("drag-over"))}
                ondragover={ondragover}
                ondragleave={ondragleave}
                ondrop={ondrop}
                onclick={link.callback(|_| Msg::OpenFilePicker)}
            >
                <span class="material-icons">{ "upload_file" }</span>
                <span>{ format!("Drop a file here or click to browse (max {max_mb} MB)") }</span>
            </div>
            <input
                ref={page.file_input_ref.clone()}
                type="file"
                accept={accept}
                style="display: none;"
                onchange={onchange}
            />
            { current }
            if let Some(error) = controller.asset_error() {
                <small class="form-error">{ error.to_string() }</small>
            }
        </div>
    }
}
