use std::rc::Rc;

use common::config::AppConfig;

use crate::app::{App, AppProps};

mod api;
mod app;
mod components;
mod edit_sheet;
mod logging;
mod records_grid;

fn main() {
    logging::init();

    let config = AppConfig::from_env_value(option_env!("API_BASE_URL")).unwrap_or_else(|err| {
        log::error!("invalid API_BASE_URL ({err}); falling back to defaults");
        AppConfig::default()
    });
    log::info!("API base URL: {}", config.api_base_url());

    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
