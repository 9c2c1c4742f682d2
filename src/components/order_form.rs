//! Order Form Component

use leptos::prelude::*;

use crate::components::{ItemsTable, PartySection};
use crate::context::FormContext;

#[component]
pub fn OrderForm() -> impl IntoView {
    let ctx = use_context::<FormContext>().expect("FormContext should be provided");
    let action = ctx.action();
    let csrf_token = ctx.csrf_token();

    view! {
        <form method="post" action=action class="order-form" id="orderForm">
            <input type="hidden" name="csrfmiddlewaretoken" value=csrf_token />
            <PartySection />
            <h5 class="mt-3">"Артикули"</h5>
            <ItemsTable />
            <div class="mt-3 text-end">
                <button type="submit" class="btn btn-primary">
                    <i class="fas fa-save me-1"></i>
                    "Запази"
                </button>
            </div>
        </form>
    }
}
