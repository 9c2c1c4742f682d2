//! Declared Autocompletes
//!
//! Server-rendered inputs marked with `data-autocomplete` get a suggestion
//! widget on page load. Picking a stock item fills the item form next to it.

use leptos_autocomplete::{field_text, Autocomplete, AutocompleteOptions};
use serde_json::Value;
use wasm_bindgen::JsCast;

const DEFAULT_FIELD: &str = "article_number";
const DEFAULT_URL: &str = "/sklad/autocomplete/";

/// Inputs that trigger recalculation after being filled
const RECALC_IDS: [&str; 2] = ["id_quantity", "id_purchase_price"];

/// Element id -> value for the form fields a picked item fills
pub fn fill_values(record: &Value) -> [(&'static str, String); 4] {
    [
        ("id_name", field_text(record, "name")),
        ("id_unit", field_text(record, "unit")),
        ("id_quantity", field_text(record, "quantity")),
        ("id_purchase_price", field_text(record, "purchase_price")),
    ]
}

pub fn declared_options(field: Option<String>, url: Option<String>) -> AutocompleteOptions {
    let non_empty = |v: Option<String>| v.filter(|v| !v.trim().is_empty());
    AutocompleteOptions::new(
        non_empty(url).unwrap_or_else(|| DEFAULT_URL.to_string()),
        non_empty(field).unwrap_or_else(|| DEFAULT_FIELD.to_string()),
    )
}

fn set_field(document: &web_sys::Document, id: &str, value: &str) {
    let Some(element) = document.get_element_by_id(id) else {
        return;
    };
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.set_value(value);
    }
}

fn fill_item_form(document: &web_sys::Document, record: &Value) {
    for (id, value) in fill_values(record) {
        set_field(document, id, &value);
    }
    for id in RECALC_IDS {
        let Some(element) = document.get_element_by_id(id) else {
            continue;
        };
        if let Ok(event) = web_sys::Event::new("input") {
            let _ = element.dispatch_event(&event);
        }
    }
}

/// Attach a widget to every `[data-autocomplete]` input in the document
pub fn attach_declared(document: &web_sys::Document) -> Vec<Autocomplete> {
    let Ok(nodes) = document.query_selector_all("[data-autocomplete]") else {
        return Vec::new();
    };

    let mut widgets = Vec::new();
    for i in 0..nodes.length() {
        let Some(input) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            continue;
        };
        let options = declared_options(
            input.get_attribute("data-autocomplete-field"),
            input.get_attribute("data-autocomplete-url"),
        );
        let document = document.clone();
        match Autocomplete::attach(input, options, move |record| fill_item_form(&document, &record)) {
            Ok(widget) => widgets.push(widget),
            Err(e) => web_sys::console::error_1(&format!("[OrderForm] Autocomplete attach failed: {:?}", e).into()),
        }
    }

    if !widgets.is_empty() {
        web_sys::console::log_1(&format!("[OrderForm] Attached {} declared autocompletes", widgets.len()).into());
    }
    widgets
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = declared_options(None, Some(" ".to_string()));
        assert_eq!(options.field, "article_number");
        assert_eq!(options.api_url, "/sklad/autocomplete/");
        assert!(options.send_field);
    }

    #[test]
    fn test_attribute_overrides() {
        let options = declared_options(Some("name".to_string()), Some("/stock/search/".to_string()));
        assert_eq!(options.request_url("ol"), "/stock/search/?q=ol&field=name");
    }

    #[test]
    fn test_fill_values() {
        let record = json!({
            "article_number": "OF-1",
            "name": "Маслен филтър",
            "unit": "бр.",
            "quantity": 4,
            "purchase_price": 12.5
        });
        let values = fill_values(&record);
        assert_eq!(values[0], ("id_name", "Маслен филтър".to_string()));
        assert_eq!(values[2], ("id_quantity", "4".to_string()));
        assert_eq!(values[3], ("id_purchase_price", "12.5".to_string()));
    }
}
