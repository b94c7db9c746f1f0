pub mod app;
pub mod app_shell;
pub mod dashboards;
pub mod domain;
pub mod layout;
pub mod projections;
pub mod shared;
pub mod system;

use shared::config::{install, ClientConfig};
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    match ClientConfig::load() {
        Ok(config) => install(config),
        Err(e) => log::error!("client config: {:#}, using defaults", e),
    }

    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
