//! Vehicle and Client Section
//!
//! Vehicle and client fields with suggestion lookups by VIN, plate and
//! client name, plus lookups by id when an id field changes.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_autocomplete::{use_autocomplete, AutocompleteOptions};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api;
use crate::context::FormContext;
use crate::models::{Car, Client};
use crate::store::{store_edit_car, store_edit_client, use_order_store, OrderStateStoreFields, OrderStore};

fn decode_record<T: DeserializeOwned>(record: Value) -> Option<T> {
    serde_json::from_value(record)
        .map_err(|e| web_sys::console::error_1(&format!("[OrderForm] Bad suggestion record: {}", e).into()))
        .ok()
}

/// Lookups for the ids the page was rendered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialLookup {
    pub car_id: Option<String>,
    pub client_id: Option<String>,
}

impl InitialLookup {
    pub fn new(car_id: &str, client_id: &str) -> Self {
        let present = |id: &str| Some(id.trim().to_string()).filter(|id| !id.is_empty());
        Self {
            car_id: present(car_id),
            client_id: present(client_id),
        }
    }

    /// The car's owner only fills the client section when the order names
    /// no client of its own.
    pub fn car_fills_client(&self) -> bool {
        self.client_id.is_none()
    }
}

/// Look a vehicle up by id, optionally filling its owner as the client.
/// An empty id clears the vehicle.
fn lookup_car(ctx: FormContext, store: OrderStore, car_id: String, fill_client: bool) {
    let car_id = car_id.trim().to_string();
    if car_id.is_empty() {
        store_edit_car(&store, |car| *car = Car::default());
        return;
    }
    let base = ctx.endpoints().car_info;
    spawn_local(async move {
        match api::fetch_car_info(&base, &car_id).await {
            Ok(info) if info.success => {
                if let Some(car) = info.car {
                    store_edit_car(&store, |current| *current = car);
                }
                if let Some(client) = info.client.filter(|_| fill_client) {
                    store_edit_client(&store, |current| *current = client);
                }
            }
            Ok(_) => web_sys::console::log_1(&format!("[OrderForm] Car {} not found", car_id).into()),
            Err(e) => web_sys::console::error_1(&format!("[OrderForm] Error fetching car info: {}", e).into()),
        }
    });
}

/// Look a client up by id. An empty id clears the client.
fn lookup_client(ctx: FormContext, store: OrderStore, client_id: String) {
    let client_id = client_id.trim().to_string();
    if client_id.is_empty() {
        store_edit_client(&store, |client| *client = Client::default());
        return;
    }
    let base = ctx.endpoints().client_info;
    spawn_local(async move {
        match api::fetch_client_info(&base, &client_id).await {
            Ok(info) if info.success => {
                if let Some(client) = info.client {
                    store_edit_client(&store, |current| *current = client);
                }
            }
            Ok(_) => web_sys::console::log_1(&format!("[OrderForm] Client {} not found", client_id).into()),
            Err(e) => web_sys::console::error_1(&format!("[OrderForm] Error fetching client info: {}", e).into()),
        }
    });
}

/// Labelled text input bound to one store field
#[component]
fn PartyField(
    id: &'static str,
    name: &'static str,
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    view! {
        <div class="mb-2 position-relative">
            <label class="form-label" for=id>{label}</label>
            <input
                type="text"
                class="form-control"
                id=id
                name=name
                node_ref=node_ref
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn PartySection() -> impl IntoView {
    let ctx = use_context::<FormContext>().expect("FormContext should be provided");
    let store = use_order_store();
    let endpoints = ctx.endpoints();

    let vin_ref = NodeRef::<html::Input>::new();
    let plate_ref = NodeRef::<html::Input>::new();
    let client_name_ref = NodeRef::<html::Input>::new();

    let select_car = move |record: Value| {
        if let Some(car) = decode_record::<Car>(record) {
            web_sys::console::log_1(&format!("[OrderForm] Selected car {}", car.id).into());
            store_edit_car(&store, |current| *current = car);
        }
    };
    use_autocomplete(
        vin_ref,
        AutocompleteOptions::new(endpoints.car_vin.clone(), "vin").without_field_param(),
        select_car,
    );
    use_autocomplete(
        plate_ref,
        AutocompleteOptions::new(endpoints.car_plate.clone(), "plate_number").without_field_param(),
        select_car,
    );
    use_autocomplete(
        client_name_ref,
        AutocompleteOptions::new(endpoints.client_search.clone(), "name").without_field_param(),
        move |record| {
            if let Some(client) = decode_record::<Client>(record) {
                web_sys::console::log_1(&format!("[OrderForm] Selected client {}", client.id).into());
                store_edit_client(&store, |current| *current = client);
            }
        },
    );

    // Records for ids the page was rendered with
    let initial = InitialLookup::new(
        &store.car().with_untracked(|car| car.id.clone()),
        &store.client().with_untracked(|client| client.id.clone()),
    );
    Effect::new(move |_| {
        if let Some(car_id) = initial.car_id.clone() {
            lookup_car(ctx, store, car_id, initial.car_fills_client());
        }
        if let Some(client_id) = initial.client_id.clone() {
            lookup_client(ctx, store, client_id);
        }
    });

    let car_text = move |pick: fn(&Car) -> String| Signal::derive(move || store.car().with(pick));
    let client_text = move |pick: fn(&Client) -> String| Signal::derive(move || store.client().with(pick));

    view! {
        <div class="row party-section">
            <div class="col-md-6 car-section">
                <h5>"Автомобил"</h5>
                <div class="mb-2">
                    <label class="form-label" for="car-select">"Автомобил ID"</label>
                    <input
                        type="text"
                        class="form-control"
                        id="car-select"
                        name="car"
                        prop:value=move || store.car().with(|car| car.id.clone())
                        on:change=move |ev| lookup_car(ctx, store, event_target_value(&ev), true)
                    />
                </div>
                <PartyField
                    id="car-vin"
                    name="car_vin"
                    label="VIN"
                    node_ref=vin_ref
                    value=car_text(|car| car.vin.clone())
                    on_input=move |v: String| store_edit_car(&store, |car| car.vin = v)
                />
                <PartyField
                    id="car-plate-number"
                    name="car_plate_number"
                    label="Рег. номер"
                    node_ref=plate_ref
                    value=car_text(|car| car.plate_number.clone())
                    on_input=move |v: String| store_edit_car(&store, |car| car.plate_number = v)
                />
                <PartyField
                    id="car-brand-model"
                    name="car_brand_model"
                    label="Марка / модел"
                    value=car_text(|car| car.brand_model.clone())
                    on_input=move |v: String| store_edit_car(&store, |car| car.brand_model = v)
                />
                <PartyField
                    id="car-mileage"
                    name="car_mileage"
                    label="Пробег"
                    value=car_text(|car| car.mileage.clone())
                    on_input=move |v: String| store_edit_car(&store, |car| car.mileage = v)
                />
            </div>
            <div class="col-md-6 client-section">
                <h5>"Клиент"</h5>
                <div class="mb-2">
                    <label class="form-label" for="client-select">"Клиент ID"</label>
                    <input
                        type="text"
                        class="form-control"
                        id="client-select"
                        name="client"
                        prop:value=move || store.client().with(|client| client.id.clone())
                        on:change=move |ev| lookup_client(ctx, store, event_target_value(&ev))
                    />
                </div>
                <PartyField
                    id="client-name"
                    name="client_name"
                    label="Име"
                    node_ref=client_name_ref
                    value=client_text(|client| client.name.clone())
                    on_input=move |v: String| store_edit_client(&store, |client| client.name = v)
                />
                <PartyField
                    id="client-address"
                    name="client_address"
                    label="Адрес"
                    value=client_text(|client| client.address.clone())
                    on_input=move |v: String| store_edit_client(&store, |client| client.address = v)
                />
                <PartyField
                    id="client-phone"
                    name="client_phone"
                    label="Телефон"
                    value=client_text(|client| client.phone.clone())
                    on_input=move |v: String| store_edit_client(&store, |client| client.phone = v)
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_lookup_both_ids() {
        let initial = InitialLookup::new("4", "9");
        assert_eq!(initial.car_id.as_deref(), Some("4"));
        assert_eq!(initial.client_id.as_deref(), Some("9"));
        assert!(!initial.car_fills_client());
    }

    #[test]
    fn test_initial_lookup_car_only() {
        let initial = InitialLookup::new("4", " ");
        assert_eq!(initial.client_id, None);
        assert!(initial.car_fills_client());
        assert_eq!(InitialLookup::new("", "").car_id, None);
    }

    #[test]
    fn test_decode_car_suggestion() {
        let car: Option<Car> = decode_record(json!({
            "id": 3,
            "display_text": "CA1234AB - FIAT DUCATO",
            "vin": "ZFA25000001234567",
            "plate_number": "CA1234AB",
            "brand_model": "FIAT DUCATO",
            "mileage": null
        }));
        let car = car.unwrap();
        assert_eq!(car.id, "3");
        assert_eq!(car.mileage, "");
    }

    #[test]
    fn test_decode_client_suggestion() {
        let client: Option<Client> = decode_record(json!({"id": "12", "name": "Иван Петров", "phone": 359888}));
        let client = client.unwrap();
        assert_eq!(client.name, "Иван Петров");
        assert_eq!(client.phone, "359888");
        assert_eq!(client.address, "");
    }
}
