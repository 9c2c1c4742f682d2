//! Item Row Component
//!
//! One editable line of the order item table. Every input writes straight
//! into the store; amounts are derived from the row on each change.

use leptos::html;
use leptos::prelude::*;

use crate::components::{DualAmountCell, UnitSelect};
use crate::context::FormContext;
use crate::money::row_amounts;
use crate::rows::{field_name, row_position, LineItemRow, RowField};
use crate::store::{store_remove_row, store_update_row, use_order_store, OrderStateStoreFields};

/// Value an input event should store; `None` while the browser can't parse
/// the typed text (`value` reads empty then, e.g. `2,` or `1e`).
pub fn typed_number(value: String, bad_input: bool) -> Option<String> {
    (!bad_input).then_some(value)
}

/// Whether a stored value has to be written into the input. Values the input
/// produced itself already match.
pub fn needs_push(shown: &str, stored: &str) -> bool {
    shown != stored
}

/// Number field that never rewrites what the user is typing. Only changes
/// from elsewhere (catalog pick) are pushed into it.
#[component]
fn NumberInput(
    class: &'static str,
    name: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    let node = NodeRef::<html::Input>::new();
    let initial = value.get_untracked();

    Effect::new(move |_| {
        let stored = value.get();
        if let Some(input) = node.get() {
            if needs_push(&input.value(), &stored) {
                input.set_value(&stored);
            }
        }
    });

    view! {
        <input
            type="number"
            class=class
            name=name
            step="0.01"
            min="0"
            placeholder="0.00"
            required
            node_ref=node
            value=initial
            on:input=move |ev| {
                let input = event_target::<web_sys::HtmlInputElement>(&ev);
                if let Some(value) = typed_number(input.value(), input.validity().bad_input()) {
                    on_input.run(value);
                }
            }
        />
    }
}

#[component]
pub fn ItemRow(index: u32) -> impl IntoView {
    let ctx = use_context::<FormContext>().expect("FormContext should be provided");
    let store = use_order_store();
    let prefix = ctx.prefix();
    let name = move |field: RowField| field_name(&prefix, index, field);

    let row = Memo::new(move |_| {
        store.rows().with(|rows| {
            rows.iter()
                .find(|row| row.index == index)
                .cloned()
                .unwrap_or_else(|| LineItemRow::blank(index))
        })
    });
    let position = Memo::new(move |_| store.rows().with(|rows| row_position(rows, index).unwrap_or_default()));
    let amounts = Memo::new(move |_| row_amounts(row.get().line_input()));

    let update = move |edit: fn(&mut LineItemRow, String), value: String| {
        store_update_row(&store, index, |row| edit(row, value));
    };

    view! {
        <tr class="item-row">
            <td class="text-center">{move || position.get()}</td>
            <td style="display: none;">
                <input
                    type="hidden"
                    name=name(RowField::SkladItem)
                    prop:value=move || row.with(|r| r.sklad_item.clone())
                />
            </td>
            <td>
                <input
                    type="text"
                    class="form-control"
                    name=name(RowField::ArticleNumber)
                    placeholder="Артикул номер"
                    prop:value=move || row.with(|r| r.article_number.clone())
                    on:input=move |ev| update(|r, v| r.article_number = v, event_target_value(&ev))
                />
            </td>
            <td>
                <input
                    type="text"
                    class="form-control"
                    name=name(RowField::Name)
                    placeholder="Наименование"
                    required
                    prop:value=move || row.with(|r| r.name.clone())
                    on:input=move |ev| update(|r, v| r.name = v, event_target_value(&ev))
                />
            </td>
            <td>
                <UnitSelect
                    value=Signal::derive(move || row.with(|r| r.unit.clone()))
                    on_change=move |unit: String| update(|r, v| r.unit = v, unit)
                    placeholder="Избери мерна единица"
                    name=name(RowField::Unit)
                    required=true
                />
            </td>
            <td>
                <NumberInput
                    class="form-control quantity-input"
                    name=name(RowField::Quantity)
                    value=Memo::new(move |_| row.with(|r| r.quantity.clone()))
                    on_input=move |text: String| update(|r, v| r.quantity = v, text)
                />
            </td>
            <td>
                <NumberInput
                    class="form-control price-input"
                    name=name(RowField::PurchasePrice)
                    value=Memo::new(move |_| row.with(|r| r.purchase_price.clone()))
                    on_input=move |text: String| update(|r, v| r.purchase_price = v, text)
                />
            </td>
            <td class="price-with-vat">
                <DualAmountCell amount=Signal::derive(move || amounts.get().unit_price_display) />
            </td>
            <td class="total-price">
                <DualAmountCell amount=Signal::derive(move || amounts.get().total_display) />
            </td>
            <td class="text-center">
                <input
                    type="checkbox"
                    class="form-check-input include-vat-checkbox"
                    name=name(RowField::IncludeVat)
                    prop:checked=move || row.with(|r| r.include_vat)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        store_update_row(&store, index, |row| row.include_vat = checked);
                    }
                />
            </td>
            <td class="text-center">
                <button
                    type="button"
                    class="btn btn-sm btn-outline-primary sklad-modal-btn"
                    title="Избери от склад"
                    on:click=move |_| ctx.open_picker(index)
                >
                    <i class="fas fa-warehouse"></i>
                </button>
                <button
                    type="button"
                    class="btn btn-sm btn-outline-danger remove-item-btn"
                    title="Премахни"
                    on:click=move |_| {
                        web_sys::console::log_1(&format!("[OrderForm] Removing row {}", index).into());
                        store_remove_row(&store, index);
                    }
                >
                    <i class="fas fa-trash"></i>
                </button>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_typing_is_not_stored() {
        // "2," in a number input reads as "" with bad input set
        assert_eq!(typed_number(String::new(), true), None);
        assert_eq!(typed_number("2.5".to_string(), false), Some("2.5".to_string()));
        assert_eq!(typed_number(String::new(), false), Some(String::new()));
    }

    #[test]
    fn test_own_value_is_not_pushed_back() {
        assert!(!needs_push("2", "2"));
        assert!(!needs_push("", ""));
        // catalog pick while the field holds unparsable text
        assert!(needs_push("", "55"));
        assert!(needs_push("3", "55"));
    }
}
