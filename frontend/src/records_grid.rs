use yew::{html, Callback, Component, Context, Html, Properties};

/// One rendered row. `cells` follow the grid's `headers` order.
#[derive(Clone, Debug, PartialEq)]
pub struct GridRow {
    pub id: i64,
    pub cells: Vec<String>,
    /// Resolved asset URL, rendered in the trailing asset column.
    pub asset_url: Option<String>,
}

#[derive(Properties, PartialEq)]
pub struct RecordsGridProps {
    pub headers: Vec<String>,
    pub rows: Vec<GridRow>,
    /// Header of the asset column; `None` hides the column.
    #[prop_or_default]
    pub asset_header: Option<String>,
    #[prop_or_default]
    pub asset_is_image: bool,
    pub loading: bool,
    pub empty_text: String,
    pub on_edit: Callback<i64>,
    pub on_delete: Callback<i64>,
}

pub struct RecordsGrid;

impl Component for RecordsGrid {
    type Message = ();
    type Properties = RecordsGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        RecordsGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let columns = props.headers.len() + usize::from(props.asset_header.is_some()) + 1;
        let style = format!(
            "display: grid;
             grid-template-columns: repeat({}, minmax(0, 1fr));
             gap: 0;
             width: 100%;",
            columns
        );

        html! {
            <div class="records-grid" style={style}>
                { for props.headers.iter().map(|h| html! { <div class="grid-head">{ h.clone() }</div> }) }
                if let Some(header) = &props.asset_header {
                    <div class="grid-head">{ header.clone() }</div>
                }
                <div class="grid-head">{ "Actions" }</div>
                {
                    if props.loading && props.rows.is_empty() {
                        html! { <div class="grid-status" style="grid-column: 1 / -1;">{ "Loading..." }</div> }
                    } else if props.rows.is_empty() {
                        html! { <div class="grid-status" style="grid-column: 1 / -1;">{ props.empty_text.clone() }</div> }
                    } else {
                        html! { <>{ for props.rows.iter().map(|row| view_row(props, row)) }</> }
                    }
                }
            </div>
        }
    }
}

fn view_row(props: &RecordsGridProps, row: &GridRow) -> Html {
    let id = row.id;
    let on_edit = props.on_edit.reform(move |_| id);
    let on_delete = props.on_delete.reform(move |_| id);

    html! {
        <>
            { for row.cells.iter().map(|cell| html! { <div class="grid-cell">{ cell.clone() }</div> }) }
            if props.asset_header.is_some() {
                <div class="grid-cell">
                    {
                        match (&row.asset_url, props.asset_is_image) {
                            (Some(url), true) => html! { <img class="grid-thumb" src={url.clone()} alt="" /> },
                            (Some(url), false) => html! {
                                <a href={url.clone()} target="_blank" rel="noopener">{ "View" }</a>
                            },
                            (None, _) => html! { <span class="muted">{ "-" }</span> },
                        }
                    }
                </div>
            }
            <div class="grid-cell grid-actions">
                <button class="icon-btn" title="Edit" onclick={on_edit}>
                    <span class="material-icons">{ "edit" }</span>
                </button>
                <button class="icon-btn danger" title="Delete" onclick={on_delete}>
                    <span class="material-icons">{ "delete" }</span>
                </button>
            </div>
        </>
    }
}
