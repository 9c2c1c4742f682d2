//! Order Form State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Car, Client, InitialPayload};
use crate::rows::{self, LineItemRow};

/// Everything the user edits on the order page
#[derive(Clone, Debug, Default, Store)]
pub struct OrderState {
    /// Item table rows in display order
    pub rows: Vec<LineItemRow>,
    pub car: Car,
    pub client: Client,
}

impl OrderState {
    pub fn from_payload(payload: &InitialPayload) -> Self {
        Self {
            rows: rows::rows_from_initial(&payload.items),
            car: Car { id: payload.car_id.clone(), ..Default::default() },
            client: Client { id: payload.client_id.clone(), ..Default::default() },
        }
    }
}

/// Type alias for the store
pub type OrderStore = Store<OrderState>;

/// Get the order store from context
pub fn use_order_store() -> OrderStore {
    expect_context::<OrderStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Append an empty row; returns its formset index
pub fn store_add_row(store: &OrderStore) -> u32 {
    rows::push_blank_row(&mut store.rows().write())
}

pub fn store_remove_row(store: &OrderStore, index: u32) {
    rows::remove_row(&mut store.rows().write(), index);
}

/// Edit one row in place by formset index
pub fn store_update_row(store: &OrderStore, index: u32, edit: impl FnOnce(&mut LineItemRow)) {
    if let Some(row) = store.rows().write().iter_mut().find(|row| row.index == index) {
        edit(row);
    }
}

pub fn store_edit_car(store: &OrderStore, edit: impl FnOnce(&mut Car)) {
    edit(&mut store.car().write());
}

pub fn store_edit_client(store: &OrderStore, edit: impl FnOnce(&mut Client)) {
    edit(&mut store.client().write());
}
