//! Resource page: one generic CRUD screen per catalogue entry.
//!
//! The component is a thin host around `common`'s `ResourceController`. It
//! wires the controller's effects to the HTTP gateway and renders its state.
//! Submodules follow the usual split: `state`, `messages`, `props`,
//! `update`, `view` and `helpers`.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ResourcePageProps;
pub use state::ResourcePage;

impl Component for ResourcePage {
    type Message = Msg;
    type Properties = ResourcePageProps;

    fn create(ctx: &Context<Self>) -> Self {
        ResourcePage::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            let page = self.controller.pagination().current_page;
            let effects = self.controller.list(page, "");
            update::run_effects(self, ctx, effects);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        helpers::set_window_dirty_flag(false);
    }
}
