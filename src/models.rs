//! Frontend Models
//!
//! Data structures matching the JSON the order endpoints return.

use leptos_autocomplete::value_text;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a string, number or null for a text field (ids, mileage, ...)
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(&Value::deserialize(deserializer)?))
}

fn default_true() -> bool {
    true
}

/// Vehicle record (autocomplete suggestion or lookup by id)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Car {
    #[serde(default, deserialize_with = "text_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub brand_model: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub vin: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub plate_number: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub mileage: String,
}

/// Client record (autocomplete suggestion or lookup by id)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Client {
    #[serde(default, deserialize_with = "text_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub address: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub phone: String,
}

/// Stock entry listed in the catalog picker
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    #[serde(default, deserialize_with = "text_or_number")]
    pub article_number: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub unit: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(default)]
    pub total_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub has_previous: bool,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub previous_page: Option<u32>,
    #[serde(default)]
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateResponse {
    #[serde(default)]
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitsResponse {
    #[serde(default)]
    pub units: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarInfoResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub car: Option<Car>,
    #[serde(default)]
    pub client: Option<Client>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfoResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub client: Option<Client>,
}

/// Line item already on the order when the page loads
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InitialItem {
    #[serde(default, deserialize_with = "text_or_number")]
    pub sklad_item: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub article_number: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub unit: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub quantity: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub purchase_price: String,
    #[serde(default = "default_true")]
    pub include_vat: bool,
}

/// JSON embedded in the page next to the mount point
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InitialPayload {
    #[serde(default)]
    pub items: Vec<InitialItem>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub car_id: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub client_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_car_from_suggestion() {
        let car: Car = serde_json::from_value(json!({
            "id": 17,
            "brand_model": "FIAT DUCATO",
            "vin": "ZFA25000001234567",
            "plate_number": "CA1234AB",
            "mileage": 120000,
            "display_text": "ZFA25000001234567 - FIAT DUCATO"
        }))
        .unwrap();
        assert_eq!(car.id, "17");
        assert_eq!(car.mileage, "120000");
        assert_eq!(car.plate_number, "CA1234AB");
    }

    #[test]
    fn test_client_with_nulls() {
        let client: Client = serde_json::from_value(json!({
            "id": 3, "name": "Иван Петров", "address": null
        }))
        .unwrap();
        assert_eq!(client.address, "");
        assert_eq!(client.phone, "");
    }

    #[test]
    fn test_catalog_page() {
        let page: CatalogPage = serde_json::from_value(json!({
            "items": [{
                "id": 5, "article_number": "FLT-01", "name": "Филтър", "unit": "бр.",
                "quantity": 4.0, "purchase_price": 12.5, "total_value": 50.0
            }],
            "pagination": {
                "current_page": 2, "total_pages": 9, "has_previous": true, "has_next": true,
                "previous_page": 1, "next_page": 3
            }
        }))
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].purchase_price, 12.5);
        assert_eq!(page.pagination.next_page, Some(3));
    }

    #[test]
    fn test_pagination_without_neighbours() {
        let info: PageInfo = serde_json::from_value(json!({
            "current_page": 1, "total_pages": 1, "has_previous": false, "has_next": false,
            "previous_page": null, "next_page": null
        }))
        .unwrap();
        assert_eq!(info.previous_page, None);
    }

    #[test]
    fn test_payload_defaults() {
        let payload: InitialPayload = serde_json::from_value(json!({
            "items": [{ "name": "Труд", "quantity": 2, "purchase_price": "35.50" }],
            "car_id": 8
        }))
        .unwrap();
        assert_eq!(payload.car_id, "8");
        assert_eq!(payload.client_id, "");
        assert_eq!(payload.items[0].quantity, "2");
        assert!(payload.items[0].include_vat);
    }
}
