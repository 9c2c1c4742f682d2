//! Totals Footer
//!
//! Grand totals under the item table. The VAT line only shows while at
//! least one row carries VAT.

use leptos::prelude::*;

use crate::components::DualAmountCell;
use crate::money::{grand_totals, total_label, GrandTotals};
use crate::store::{use_order_store, OrderStateStoreFields};

#[component]
pub fn TotalsFooter() -> impl IntoView {
    let store = use_order_store();
    let totals = Memo::new(move |_| {
        store.rows().with(|rows| grand_totals(rows.iter().map(|row| row.line_input())))
    });
    let amount = move |pick: fn(&GrandTotals) -> f64| Signal::derive(move || totals.with(pick));

    view! {
        <tfoot class="order-totals">
            <tr>
                <td colspan="8" class="text-end fw-bold">"Общо без ДДС:"</td>
                <td id="totalWithoutVat" colspan="2">
                    <DualAmountCell amount=amount(|t| t.without_vat) />
                </td>
            </tr>
            <Show when=move || totals.with(|t| t.has_vat_items)>
                <tr id="vatRow">
                    <td colspan="8" class="text-end fw-bold">"ДДС (20%):"</td>
                    <td id="totalVat" colspan="2">
                        <DualAmountCell amount=amount(|t| t.vat) />
                    </td>
                </tr>
            </Show>
            <tr>
                <td colspan="8" class="text-end fw-bold" id="totalLabel">
                    {move || total_label(totals.with(|t| t.has_vat_items))}
                </td>
                <td id="totalWithVat" colspan="2">
                    <DualAmountCell amount=amount(|t| t.with_vat) />
                </td>
            </tr>
        </tfoot>
    }
}
