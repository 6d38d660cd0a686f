use gloo_timers::callback::Timeout;
use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

const SHOW_CLASS: &str = "show";
const TRANSITION_DELAY_MS: u32 = 50;

/// Slide-down sheet hosting the add/edit form of a resource page.
pub struct EditSheet {
    pub id: String,
    node_ref: NodeRef,
    pending: Option<Timeout>,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub open: bool,
    pub title: String,
    #[prop_or_default]
    pub dirty: bool,
    #[prop_or_default]
    pub children: Html,
}

impl Component for EditSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
            node_ref: NodeRef::default(),
            pending: None,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={self.node_ref.clone()}>
                <header class="top-sheet-header">
                    <h3>{ props.title.clone() }</h3>
                    if props.dirty {
                        <span class="dirty-dot" title="Unsaved changes" />
                    }
                </header>
                if props.open {
                    { props.children.clone() }
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.toggle(ctx.props().open);
    }
}

impl EditSheet {
    /// Flips the `show` class after a short delay so the CSS transition runs
    /// on the freshly rendered children.
    fn toggle(&mut self, open: bool) {
        let Some(sheet) = self.node_ref.cast::<web_sys::Element>() else {
            return;
        };
        if sheet.class_list().contains(SHOW_CLASS) == open {
            return;
        }
        self.pending = Some(Timeout::new(TRANSITION_DELAY_MS, move || {
            let classes = sheet.class_list();
            let _ = if open {
                classes.add_1(SHOW_CLASS)
            } else {
                classes.remove_1(SHOW_CLASS)
            };
        }));
    }
}
