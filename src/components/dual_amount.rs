//! Dual Currency Amount
//!
//! Shows an amount in leva with its euro equivalent underneath.

use leptos::prelude::*;

use crate::context::FormContext;
use crate::money::dual_amount;

#[component]
pub fn DualAmountCell(#[prop(into)] amount: Signal<f64>) -> impl IntoView {
    let ctx = use_context::<FormContext>().expect("FormContext should be provided");
    let display = Memo::new(move |_| dual_amount(amount.get(), ctx.rate.get()));

    view! {
        <div class="bgn-price">{move || display.get().primary}</div>
        <div class="eur-price text-muted small">{move || display.get().secondary}</div>
    }
}
