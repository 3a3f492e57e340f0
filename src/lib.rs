pub mod api;
pub mod app;
pub mod planner;
pub mod runner;
pub mod session;
pub mod table;
pub mod types;

mod pages;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount_to_body(app::App);
}
