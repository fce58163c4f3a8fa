mod api;
mod app;
mod pages;
mod state;
mod types;

use leptos::*;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(app::App);
}
