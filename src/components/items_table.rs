//! Items Table Component
//!
//! Order line items with the formset management fields the server needs
//! to read them back.

use leptos::prelude::*;

use crate::components::{ItemRow, TotalsFooter};
use crate::context::FormContext;
use crate::rows::management_name;
use crate::store::{store_add_row, use_order_store, OrderStateStoreFields};

/// Upper bound the server accepts for the formset
pub const MAX_NUM_FORMS: u32 = 1000;

#[component]
pub fn ItemsTable() -> impl IntoView {
    let ctx = use_context::<FormContext>().expect("FormContext should be provided");
    let store = use_order_store();
    let prefix = ctx.prefix();

    // Rows that came with the page; the server matches them up on save
    let initial_forms = store.rows().with_untracked(|rows| rows.len());
    let total_forms = move || store.rows().with(|rows| rows.len()).to_string();

    let add_row = move |_| {
        let index = store_add_row(&store);
        web_sys::console::log_1(&format!("[OrderForm] Added row {}", index).into());
        if ctx.units.with_untracked(|units| units.is_empty()) {
            ctx.load_units();
        }
    };

    view! {
        <div class="order-items">
            <input type="hidden" name=management_name(&prefix, "TOTAL_FORMS") prop:value=total_forms />
            <input type="hidden" name=management_name(&prefix, "INITIAL_FORMS") value=initial_forms.to_string() />
            <input type="hidden" name=management_name(&prefix, "MIN_NUM_FORMS") value="0" />
            <input type="hidden" name=management_name(&prefix, "MAX_NUM_FORMS") value=MAX_NUM_FORMS.to_string() />

            <table class="table table-sm align-middle" id="itemsTable">
                <thead>
                    <tr>
                        <th class="text-center">"№"</th>
                        <th style="display: none;"></th>
                        <th>"Артикул №"</th>
                        <th>"Наименование"</th>
                        <th>"Мярка"</th>
                        <th>"Количество"</th>
                        <th>"Ед. цена"</th>
                        <th>"Цена с ДДС"</th>
                        <th>"Обща цена"</th>
                        <th class="text-center">"ДДС"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody id="itemsTableBody">
                    <For
                        each=move || store.rows().with(|rows| rows.iter().map(|row| row.index).collect::<Vec<_>>())
                        key=|index| *index
                        children=move |index| view! { <ItemRow index=index /> }
                    />
                </tbody>
                <TotalsFooter />
            </table>

            <button type="button" class="btn btn-outline-primary btn-sm" id="addItemBtn" on:click=add_row>
                <i class="fas fa-plus me-1"></i>
                "Добави артикул"
            </button>
        </div>
    }
}
