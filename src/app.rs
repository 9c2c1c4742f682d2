//! Order Form App
//!
//! Root component: provides the form context and store, loads the
//! currency rate and units, renders the form and the catalog picker.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{CatalogModal, OrderForm};
use crate::config::FormConfig;
use crate::context::FormContext;
use crate::models::InitialPayload;
use crate::store::OrderState;

#[component]
pub fn App(config: FormConfig, payload: InitialPayload) -> impl IntoView {
    let ctx = FormContext::new(config);
    let store = Store::new(OrderState::from_payload(&payload));
    web_sys::console::log_1(&format!("[OrderForm] Mounted with {} rows", payload.items.len()).into());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Rate and units once on mount
    Effect::new(move |_| {
        ctx.reload_rate();
        ctx.load_units();
    });

    view! {
        <div class="order-form-app">
            <OrderForm />
            <CatalogModal />
        </div>
    }
}
