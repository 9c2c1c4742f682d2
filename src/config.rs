//! Page Configuration
//!
//! Endpoint URLs and form settings. Defaults match the server's routes;
//! the mount element's `data-*` attributes override them.

use crate::models::InitialPayload;
use crate::money::CurrencyRate;
use crate::rows::DEFAULT_PREFIX;

/// Element the order form mounts into
pub const ROOT_ELEMENT_ID: &str = "order-form-root";
/// `<script type="application/json">` holding the initial rows and ids
pub const PAYLOAD_ELEMENT_ID: &str = "order-form-data";

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub rate: String,
    pub units: String,
    pub catalog: String,
    pub car_vin: String,
    pub car_plate: String,
    pub client_search: String,
    pub car_info: String,
    pub client_info: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            rate: "/poruchki/currency-rate/".to_string(),
            units: "/poruchki/sklad-units/".to_string(),
            catalog: "/poruchki/sklad-modal-data/".to_string(),
            car_vin: "/poruchki/autocomplete/car-vin/".to_string(),
            car_plate: "/poruchki/autocomplete/car-plate/".to_string(),
            client_search: "/poruchki/autocomplete/client/".to_string(),
            car_info: "/poruchki/get-car-info/".to_string(),
            client_info: "/poruchki/get-client-info/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    pub endpoints: Endpoints,
    /// Formset prefix for row field names
    pub prefix: String,
    pub csrf_token: String,
    /// Form POST target; empty posts back to the current URL
    pub action: String,
    pub default_rate: CurrencyRate,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            csrf_token: String::new(),
            action: String::new(),
            default_rate: CurrencyRate::default(),
        }
    }
}

impl FormConfig {
    /// Build from an attribute lookup; blank attributes count as missing
    pub fn from_attributes<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let attr = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        let endpoints = &mut config.endpoints;
        for (name, slot) in [
            ("data-rate-url", &mut endpoints.rate),
            ("data-units-url", &mut endpoints.units),
            ("data-catalog-url", &mut endpoints.catalog),
            ("data-car-vin-url", &mut endpoints.car_vin),
            ("data-car-plate-url", &mut endpoints.car_plate),
            ("data-client-url", &mut endpoints.client_search),
            ("data-car-info-url", &mut endpoints.car_info),
            ("data-client-info-url", &mut endpoints.client_info),
        ] {
            if let Some(value) = attr(name) {
                *slot = value;
            }
        }

        if let Some(prefix) = attr("data-prefix") {
            config.prefix = prefix;
        }
        if let Some(token) = attr("data-csrf-token") {
            config.csrf_token = token;
        }
        if let Some(action) = attr("data-action") {
            config.action = action;
        }
        if let Some(rate) = attr("data-default-rate")
            .and_then(|v| v.parse::<f64>().ok())
            .and_then(CurrencyRate::new)
        {
            config.default_rate = rate;
        }
        config
    }

    pub fn from_element(element: &web_sys::Element) -> Self {
        Self::from_attributes(|name| element.get_attribute(name))
    }
}

pub fn parse_payload(text: &str) -> Result<InitialPayload, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(InitialPayload::default());
    }
    serde_json::from_str(text)
}

/// Initial rows and ids embedded in the page; empty if absent or invalid
pub fn read_payload(document: &web_sys::Document) -> InitialPayload {
    let Some(script) = document.get_element_by_id(PAYLOAD_ELEMENT_ID) else {
        return InitialPayload::default();
    };
    let text = script.text_content().unwrap_or_default();
    parse_payload(&text).unwrap_or_else(|e| {
        web_sys::console::error_1(&format!("[OrderForm] Invalid page payload: {}", e).into());
        InitialPayload::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> FormConfig {
        let attrs: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        FormConfig::from_attributes(|name| attrs.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, FormConfig::default());
        assert_eq!(config.prefix, "order_items");
        assert_eq!(config.endpoints.catalog, "/poruchki/sklad-modal-data/");
        assert_eq!(config.default_rate.get(), 1.95583);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("data-catalog-url", "/api/stock/"),
            ("data-prefix", "items"),
            ("data-csrf-token", "abc"),
            ("data-default-rate", "2.0"),
            ("data-units-url", "   "),
        ]);
        assert_eq!(config.endpoints.catalog, "/api/stock/");
        assert_eq!(config.endpoints.units, "/poruchki/sklad-units/");
        assert_eq!(config.prefix, "items");
        assert_eq!(config.csrf_token, "abc");
        assert_eq!(config.default_rate.get(), 2.0);
    }

    #[test]
    fn test_invalid_rate_keeps_default() {
        let config = config_from(&[("data-default-rate", "0")]);
        assert_eq!(config.default_rate, CurrencyRate::default());
        let config = config_from(&[("data-default-rate", "abc")]);
        assert_eq!(config.default_rate, CurrencyRate::default());
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload("  ").unwrap(), InitialPayload::default());
        let payload = parse_payload(r#"{"items": [{"name": "Масло"}], "client_id": 4}"#).unwrap();
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.client_id, "4");
        assert!(parse_payload("{").is_err());
    }
}
