//! Form Context
//!
//! Shared page state provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::config::{Endpoints, FormConfig};
use crate::money::CurrencyRate;

/// Page-wide signals provided via context
#[derive(Clone, Copy)]
pub struct FormContext {
    config: StoredValue<FormConfig>,
    /// Currency rate used for every secondary-currency display - read
    pub rate: ReadSignal<CurrencyRate>,
    /// Currency rate - write
    set_rate: WriteSignal<CurrencyRate>,
    /// Catalog units for row selects and the picker filter - read
    pub units: ReadSignal<Vec<String>>,
    /// Catalog units - write
    set_units: WriteSignal<Vec<String>>,
    /// Row the catalog picker fills (None = picker closed) - read
    pub picking_for: ReadSignal<Option<u32>>,
    /// Row the catalog picker fills - write
    set_picking_for: WriteSignal<Option<u32>>,
}

impl FormContext {
    pub fn new(config: FormConfig) -> Self {
        let (rate, set_rate) = signal(config.default_rate);
        let (units, set_units) = signal(Vec::<String>::new());
        let (picking_for, set_picking_for) = signal::<Option<u32>>(None);
        Self {
            config: StoredValue::new(config),
            rate,
            set_rate,
            units,
            set_units,
            picking_for,
            set_picking_for,
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        self.config.with_value(|config| config.endpoints.clone())
    }

    pub fn prefix(&self) -> String {
        self.config.with_value(|config| config.prefix.clone())
    }

    pub fn csrf_token(&self) -> String {
        self.config.with_value(|config| config.csrf_token.clone())
    }

    pub fn action(&self) -> String {
        self.config.with_value(|config| config.action.clone())
    }

    /// Fetch the currency rate again. Failures keep the current rate.
    pub fn reload_rate(&self) {
        let url = self.endpoints().rate;
        let rate = self.rate;
        let set_rate = self.set_rate;
        spawn_local(async move {
            match api::fetch_currency_rate(&url).await {
                Ok(Some(value)) => match CurrencyRate::new(value) {
                    Some(fetched) => set_rate.set(fetched),
                    None => web_sys::console::error_1(
                        &format!("[OrderForm] Ignoring invalid EUR rate {}", value).into(),
                    ),
                },
                Ok(None) => {}
                Err(e) => web_sys::console::log_1(
                    &format!("[OrderForm] Using default EUR rate {}: {}", rate.get_untracked().get(), e).into(),
                ),
            }
        });
    }

    /// Fetch the catalog unit list
    pub fn load_units(&self) {
        let url = self.endpoints().units;
        let set_units = self.set_units;
        spawn_local(async move {
            match api::fetch_units(&url).await {
                Ok(units) => {
                    web_sys::console::log_1(&format!("[OrderForm] Loaded {} units", units.len()).into());
                    set_units.set(units);
                }
                Err(e) => web_sys::console::error_1(&format!("[OrderForm] Error loading units: {}", e).into()),
            }
        });
    }

    /// Open the catalog picker for a row
    pub fn open_picker(&self, row_index: u32) {
        self.set_picking_for.set(Some(row_index));
    }

    pub fn close_picker(&self) {
        self.set_picking_for.set(None);
    }
}
