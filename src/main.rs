//! Order Form Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod declared;
mod models;
mod money;
mod rows;
mod store;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    for widget in declared::attach_declared(&document) {
        widget.forget();
    }

    let Some(root) = document
        .get_element_by_id(config::ROOT_ELEMENT_ID)
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        web_sys::console::log_1(&format!("[OrderForm] No #{} on this page", config::ROOT_ELEMENT_ID).into());
        return;
    };

    let config = config::FormConfig::from_element(&root);
    let payload = config::read_payload(&document);
    leptos::mount::mount_to(root, move || view! { <App config=config payload=payload /> }).forget();
}
